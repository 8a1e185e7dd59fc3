use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{TIMESTAMP_FORMAT, hash};
use crate::transaction::Transaction;

/// A single block in the chain. Field names are the wire contract shared
/// with peers, so they must not be renamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    pub timestamp: String,
    pub proof: i64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block stamped with the current local time.
    pub fn new(
        index: u64,
        proof: i64,
        previous_hash: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            index,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            proof,
            previous_hash,
            transactions,
        }
    }

    /// Digest of the canonical encoding of this block.
    pub fn hash(&self) -> String {
        hash::digest(self)
    }
}
