use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use serde_json::Number;
use thiserror::Error;
use uuid::Uuid;

use crate::blockchain::{Block, Ledger, PowError, ProofOfWork, is_valid_chain};
use crate::config::{MinerReward, NodeConfig};
use crate::network::peers::parse_netloc;
use crate::network::{ChainSnapshot, ChainSource, ConsensusResolver, PeerError, PeerRegistry};

#[derive(Debug, Error)]
pub enum MineError {
    #[error(transparent)]
    Pow(#[from] PowError),
}

/// Outcome of a consensus round.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// Point-in-time counters for the stats endpoint.
#[derive(Debug, Clone)]
pub struct NodeStats {
    pub length: usize,
    pub tip_index: u64,
    pub pending: usize,
    pub peers: usize,
}

/// The running node: ledger, peers and the machinery driving them.
/// Built once at startup and shared by every request handler.
pub struct Node {
    id: String,
    ledger: Mutex<Ledger>,
    peers: Mutex<PeerRegistry>,
    pow: ProofOfWork,
    resolver: ConsensusResolver,
    reward: Option<MinerReward>,
}

impl Node {
    pub fn new(config: &NodeConfig, source: Arc<dyn ChainSource>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerRegistry::new()),
            pow: ProofOfWork::new(config.pow_max_iterations),
            resolver: ConsensusResolver::new(source, config.peer_max_concurrency),
            reward: config.reward.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Solve the puzzle for the current tip and seal the pending pool into a
    /// new block. The search runs without holding the ledger lock; if the tip
    /// moved meanwhile, the search restarts against the new tip.
    pub fn mine(&self) -> Result<Block, MineError> {
        self.mine_with(|previous_proof| self.pow.solve(previous_proof))
    }

    fn mine_with(
        &self,
        mut search: impl FnMut(i64) -> Result<i64, PowError>,
    ) -> Result<Block, MineError> {
        loop {
            let (tip_index, tip_proof, tip_hash) = {
                let ledger = self.ledger.lock().expect("mutex poisoned");
                let tip = ledger.previous_block();
                (tip.index, tip.proof, tip.hash())
            };

            let proof = search(tip_proof).inspect_err(|err| {
                warn!("MINER - proof search on top of #{tip_index} stopped: {err}");
            })?;

            let mut ledger = self.ledger.lock().expect("mutex poisoned");
            let tip = ledger.previous_block();
            if tip.index != tip_index || tip.hash() != tip_hash {
                warn!(
                    "MINER - tip moved from #{tip_index} to #{} during the search, retrying",
                    tip.index
                );
                continue;
            }

            if let Some(reward) = &self.reward {
                ledger.add_transaction(
                    self.id.clone(),
                    reward.receiver.clone(),
                    reward.amount.clone(),
                );
            }
            let block = ledger.create_block(proof, tip_hash).clone();
            info!(
                "MINER - sealed block #{} (proof={}, txs={}, previous_hash={})",
                block.index,
                block.proof,
                block.transactions.len(),
                block.previous_hash
            );
            return Ok(block);
        }
    }

    pub fn get_chain(&self) -> ChainSnapshot {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        ChainSnapshot {
            chain: ledger.chain().to_vec(),
            length: ledger.len() as u64,
        }
    }

    pub fn is_valid(&self) -> bool {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        is_valid_chain(ledger.chain())
    }

    /// Queue a transaction; returns the index of the block promised to carry it.
    pub fn submit_transaction(&self, sender: String, receiver: String, amount: Number) -> u64 {
        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        let index = ledger.add_transaction(sender, receiver, amount);
        debug!(
            "TX - queued for block #{index} (pending={})",
            ledger.pending().len()
        );
        index
    }

    /// Register every address or none: one bad address rejects the batch.
    /// Returns the full peer set afterwards.
    pub fn register_peers(&self, addresses: &[String]) -> Result<Vec<String>, PeerError> {
        let netlocs = addresses
            .iter()
            .map(|a| parse_netloc(a))
            .collect::<Result<Vec<_>, _>>()?;

        let mut peers = self.peers.lock().expect("mutex poisoned");
        for netloc in &netlocs {
            peers.register(netloc)?;
        }
        info!("PEERS - {} known after registering {}", peers.len(), netlocs.len());
        Ok(peers.list())
    }

    pub fn peers(&self) -> Vec<String> {
        self.peers.lock().expect("mutex poisoned").list()
    }

    /// Adopt the longest valid chain offered by any peer, if it is strictly
    /// longer than ours. Peer failures never surface here.
    pub async fn resolve_consensus(&self) -> Resolution {
        let peers = self.peers();
        let local_len = self.ledger.lock().expect("mutex poisoned").len();

        let candidate = self.resolver.find_longest(&peers, local_len).await;

        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        let replaced = match candidate {
            Some(chain) if chain.len() > ledger.len() => {
                info!(
                    "CONSENSUS - replacing local chain ({} blocks) with peer chain ({} blocks)",
                    ledger.len(),
                    chain.len()
                );
                ledger.replace_chain(chain);
                true
            }
            Some(chain) => {
                warn!(
                    "CONSENSUS - local chain grew to {} blocks during resolution, keeping it over {}",
                    ledger.len(),
                    chain.len()
                );
                false
            }
            None => false,
        };

        Resolution {
            replaced,
            chain: ledger.chain().to_vec(),
        }
    }

    /// Abort running and future proof searches (used on shutdown).
    pub fn cancel_mining(&self) {
        self.pow.cancel();
    }

    pub fn stats(&self) -> NodeStats {
        let (length, tip_index, pending) = {
            let ledger = self.ledger.lock().expect("mutex poisoned");
            (
                ledger.len(),
                ledger.previous_block().index,
                ledger.pending().len(),
            )
        };
        NodeStats {
            length,
            tip_index,
            pending,
            peers: self.peers.lock().expect("mutex poisoned").len(),
        }
    }
}
