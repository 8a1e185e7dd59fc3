use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use super::{ChainSnapshot, ChainSource, PeerError};
use crate::blockchain::{Block, is_valid_chain};

/// Longest-valid-chain search across peers.
pub struct ConsensusResolver {
    source: Arc<dyn ChainSource>,
    max_concurrency: usize,
}

impl ConsensusResolver {
    pub fn new(source: Arc<dyn ChainSource>, max_concurrency: usize) -> Self {
        Self {
            source,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Poll every peer and return the chain that should replace a local
    /// chain of `local_len` blocks, if any.
    ///
    /// Each peer is compared against the running maximum, not against
    /// `local_len`: a peer wins only if its reported length beats every
    /// accepted candidate seen before it and its chain validates. Ties never
    /// win. Peers are consulted in the order given; failed peers are skipped.
    pub async fn find_longest(&self, peers: &[String], local_len: usize) -> Option<Vec<Block>> {
        let results: Vec<_> = stream::iter(peers.iter().cloned())
            .map(|peer| {
                let source = Arc::clone(&self.source);
                async move {
                    let result = source.fetch_chain(&peer).await;
                    (peer, result)
                }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut max_length = local_len as u64;
        let mut best = None;
        for (peer, result) in results {
            let snapshot = match result.and_then(|snapshot| consistent(&peer, snapshot)) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!("consensus - skipping peer {peer}: {err}");
                    continue;
                }
            };

            if snapshot.length <= max_length {
                debug!(
                    "consensus - peer {peer} length {} does not beat {max_length}",
                    snapshot.length
                );
                continue;
            }
            if !is_valid_chain(&snapshot.chain) {
                warn!(
                    "consensus - peer {peer} sent an invalid chain of length {}",
                    snapshot.length
                );
                continue;
            }

            info!(
                "consensus - peer {peer} offers a valid chain of length {}",
                snapshot.length
            );
            max_length = snapshot.length;
            best = Some(snapshot.chain);
        }
        best
    }
}

// A reported length that disagrees with the payload is a malformed response.
fn consistent(peer: &str, snapshot: ChainSnapshot) -> Result<ChainSnapshot, PeerError> {
    if snapshot.length != snapshot.chain.len() as u64 {
        return Err(PeerError::LengthMismatch {
            peer: peer.to_string(),
            reported: snapshot.length,
            actual: snapshot.chain.len(),
        });
    }
    Ok(snapshot)
}
