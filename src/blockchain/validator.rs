use log::debug;
use thiserror::Error;

use super::{Block, pow};

/// Why a chain was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chain is empty")]
    EmptyChain,
    #[error("block {index} does not link to the digest of its predecessor")]
    BrokenLink { index: u64 },
    #[error("block {index} carries a proof that does not solve its predecessor's puzzle")]
    InvalidProof { index: u64 },
}

/// Walk the chain from its second block, re-deriving every link and proof.
/// Stored proofs are never trusted.
pub fn validate_chain(chain: &[Block]) -> Result<(), ValidationError> {
    if chain.is_empty() {
        return Err(ValidationError::EmptyChain);
    }

    for pair in chain.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);

        // Check linkage
        if block.previous_hash != prev.hash() {
            return Err(ValidationError::BrokenLink { index: block.index });
        }

        // Check the puzzle
        if !pow::check(block.proof, prev.proof) {
            return Err(ValidationError::InvalidProof { index: block.index });
        }
    }

    Ok(())
}

/// All-or-nothing validity of a whole chain.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    match validate_chain(chain) {
        Ok(()) => true,
        Err(err) => {
            debug!("chain of {} blocks rejected: {err}", chain.len());
            false
        }
    }
}
