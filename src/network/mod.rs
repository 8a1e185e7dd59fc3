pub mod client;
pub mod consensus;
pub mod error;
pub mod peers;

pub use client::{ChainSnapshot, ChainSource, HttpChainSource};
pub use consensus::ConsensusResolver;
pub use error::PeerError;
pub use peers::PeerRegistry;
