use std::collections::BTreeSet;

use log::debug;
use url::Url;

use super::PeerError;

/// Known peer addresses in `host[:port]` form. Only grows.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a peer given as a URL (`http://host:port/...`) or a bare
    /// `host:port`. Registering a known peer again is a no-op.
    /// Returns the normalized address.
    pub fn register(&mut self, address: &str) -> Result<String, PeerError> {
        let netloc = parse_netloc(address)?;
        if self.peers.insert(netloc.clone()) {
            debug!("peer {netloc} registered ({} known)", self.peers.len());
        }
        Ok(netloc)
    }

    pub fn list(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }
}

/// Extract the network location (host plus optional port) from an address.
pub fn parse_netloc(address: &str) -> Result<String, PeerError> {
    let invalid = |reason: &str| PeerError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = address.trim();
    let netloc = if let Some((_, rest)) = trimmed.split_once("://") {
        // Parse for validation only: `Url` drops ports equal to the scheme
        // default, but the authority must be kept as written.
        let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host"));
        }
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        authority
            .rsplit('@')
            .next()
            .unwrap_or_default()
            .to_string()
    } else {
        trimmed
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string()
    };

    if netloc.is_empty() || netloc.contains(char::is_whitespace) {
        return Err(invalid("missing host"));
    }
    Ok(netloc)
}
