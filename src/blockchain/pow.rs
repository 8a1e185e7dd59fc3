use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::POW_TARGET_PREFIX;

/// How often (in candidates) the search looks at the cancellation flag.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PowError {
    #[error("no proof found within {iterations} candidates")]
    Exhausted { iterations: u64 },
    #[error("proof search cancelled")]
    Cancelled,
}

/// Does `candidate` solve the puzzle seeded by `previous_proof`?
///
/// The puzzle digest is SHA-256 over the decimal text of
/// `candidate² - previous_proof²` (signed, so it may carry a leading `-`).
pub fn check(candidate: i64, previous_proof: i64) -> bool {
    puzzle_digest(candidate, previous_proof).starts_with(POW_TARGET_PREFIX)
}

/// Hex digest of the puzzle expression for a candidate.
pub fn puzzle_digest(candidate: i64, previous_proof: i64) -> String {
    // i64² always fits in i128, so does the difference.
    let delta = i128::from(candidate).pow(2) - i128::from(previous_proof).pow(2);
    hex::encode(Sha256::digest(delta.to_string().as_bytes()))
}

/// Proof-of-Work search with an optional iteration cap and a shared
/// cancellation flag. Neither changes which proof is found, only whether
/// the search is allowed to finish.
#[derive(Debug, Clone, Default)]
pub struct ProofOfWork {
    max_iterations: Option<u64>,
    cancelled: Arc<AtomicBool>,
}

impl ProofOfWork {
    pub fn new(max_iterations: Option<u64>) -> Self {
        Self {
            max_iterations,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Search upwards from 1 for the first candidate that passes `check`.
    pub fn solve(&self, previous_proof: i64) -> Result<i64, PowError> {
        let mut candidate: i64 = 1;
        let mut tried: u64 = 0;
        loop {
            if tried % CANCEL_CHECK_INTERVAL == 0 && self.is_cancelled() {
                return Err(PowError::Cancelled);
            }
            if check(candidate, previous_proof) {
                return Ok(candidate);
            }
            tried += 1;
            if self.max_iterations.is_some_and(|cap| tried >= cap) {
                return Err(PowError::Exhausted { iterations: tried });
            }
            candidate = candidate
                .checked_add(1)
                .ok_or(PowError::Exhausted { iterations: tried })?;
        }
    }

    /// Stop every running and future search started from this instance or its clones.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
