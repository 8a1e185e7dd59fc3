use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::blockchain::Block;
use crate::transaction::Transaction;

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub timestamp: String,
    pub proof: i64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: format!("Block #{} mined", block.index),
            index: block.index,
            timestamp: block.timestamp,
            proof: block.proof,
            previous_hash: block.previous_hash,
            transactions: block.transactions,
        }
    }
}

#[derive(Serialize)]
pub struct ValidResponse {
    pub message: String,
    pub valid: bool,
}

#[derive(Serialize)]
pub struct ReplaceResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so a missing one can be reported explicitly.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<Number>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Peer API Models ---------- */

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

/* ---------- Node API Models ---------- */

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub node_id: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub node_id: String,
    pub length: usize,
    pub tip_index: u64,
    pub pending_transactions: usize,
    pub peers: usize,
}
