pub mod block;
pub mod hash;
pub mod ledger;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use ledger::Ledger;
pub use pow::{PowError, ProofOfWork};
pub use validator::is_valid_chain;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: i64 = 1;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Fixed Proof-of-Work target: the puzzle digest must start with this (hex).
pub const POW_TARGET_PREFIX: &str = "0000";

/// Textual form of block timestamps (local time, microsecond precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
