use thiserror::Error;

/// Problems with a single peer. During consensus resolution every one of
/// these means "this peer contributes nothing this round".
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {peer} failed: {source}")]
    Request {
        peer: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("peer {peer} answered with status {status}")]
    Status { peer: String, status: u16 },

    #[error("malformed chain payload from {peer}: {reason}")]
    Malformed { peer: String, reason: String },

    #[error("peer {peer} reported length {reported} but sent {actual} blocks")]
    LengthMismatch {
        peer: String,
        reported: u64,
        actual: usize,
    },
}
