use serde_json::Number;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions not yet sealed in a block.
/// Callers sharing a ledger must serialize access to it (one lock for both).
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.create_block(GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string());
        ledger
    }

    /// Seal the whole pending pool into a new block and append it.
    pub fn create_block(&mut self, proof: i64, previous_hash: String) -> &Block {
        let index = self.chain.len() as u64 + 1;
        let transactions = std::mem::take(&mut self.pending);
        self.chain.push(Block::new(index, proof, previous_hash, transactions));
        self.previous_block()
    }

    /// Return the last block in the chain.
    pub fn previous_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Queue a transaction; returns the index of the block expected to carry it.
    pub fn add_transaction(&mut self, sender: String, receiver: String, amount: Number) -> u64 {
        self.pending.push(Transaction::new(sender, receiver, amount));
        self.previous_block().index + 1
    }

    /// Swap in a chain adopted from a peer. The pending pool is left as is.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        assert!(!chain.is_empty(), "replacement chain must not be empty");
        self.chain = chain;
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::{ProofOfWork, is_valid_chain, pow};
    use crate::transaction::Transaction;
    use serde_json::Number;

    fn mine(ledger: &mut Ledger) {
        let prev = ledger.previous_block();
        let proof = ProofOfWork::default().solve(prev.proof).unwrap();
        let hash = prev.hash();
        ledger.create_block(proof, hash);
    }

    #[test]
    fn starts_with_genesis_and_empty_pool() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.previous_block().proof, 1);
        assert_eq!(ledger.previous_block().previous_hash, "0");
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn create_block_links_to_previous() {
        let mut ledger = Ledger::new();
        let genesis_hash = ledger.previous_block().hash();
        mine(&mut ledger);

        let block = ledger.previous_block();
        assert_eq!(ledger.len(), 2);
        assert_eq!(block.index, 2);
        assert_eq!(block.previous_hash, genesis_hash);
        assert!(pow::check(block.proof, 1));
    }

    #[test]
    fn add_transaction_promises_next_index() {
        let mut ledger = Ledger::new();
        let idx = ledger.add_transaction("A".into(), "B".into(), Number::from(10));
        assert_eq!(idx, 2);
        assert_eq!(ledger.pending().len(), 1);
    }

    #[test]
    fn pool_drains_in_submission_order() {
        let mut ledger = Ledger::new();
        for i in 0..3u64 {
            ledger.add_transaction(format!("s{i}"), "r".into(), Number::from(i));
        }
        mine(&mut ledger);

        let block = ledger.previous_block();
        let senders: Vec<_> = block.transactions.iter().map(|t| t.sender.as_str()).collect();
        assert_eq!(senders, ["s0", "s1", "s2"]);
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn second_block_after_drain_is_empty() {
        let mut ledger = Ledger::new();
        ledger.add_transaction("A".into(), "B".into(), Number::from(10));
        mine(&mut ledger);
        assert_eq!(
            ledger.previous_block().transactions,
            vec![Transaction::new("A", "B", 10u64)]
        );

        mine(&mut ledger);
        assert!(ledger.previous_block().transactions.is_empty());
    }

    #[test]
    fn mined_chain_is_valid() {
        let mut ledger = Ledger::new();
        mine(&mut ledger);
        ledger.add_transaction("A".into(), "B".into(), Number::from(1));
        mine(&mut ledger);
        assert!(is_valid_chain(ledger.chain()));
    }

    #[test]
    fn replace_keeps_pending_pool() {
        let mut ledger = Ledger::new();
        ledger.add_transaction("A".into(), "B".into(), Number::from(1));

        let mut other = Ledger::new();
        mine(&mut other);
        ledger.replace_chain(other.chain().to_vec());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.pending().len(), 1);
    }
}
