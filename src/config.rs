use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use serde_json::Number;

/// Reward appended to every mined block when configured.
#[derive(Debug, Clone, PartialEq)]
pub struct MinerReward {
    pub receiver: String,
    pub amount: Number,
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single peer chain request.
    pub peer_timeout: Duration,
    /// Peers polled at once during consensus resolution.
    pub peer_max_concurrency: usize,
    /// Path under which peers serve their chain.
    pub peer_chain_path: String,
    /// `None` lets the proof search run until it succeeds.
    pub pow_max_iterations: Option<u64>,
    pub reward: Option<MinerReward>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            peer_timeout: Duration::from_secs(5),
            peer_max_concurrency: 8,
            peer_chain_path: "/getChain".to_string(),
            pow_max_iterations: None,
            reward: None,
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source; missing or unparseable
    /// values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let reward = text("MINER_REWARD_RECEIVER").map(|receiver| MinerReward {
            receiver,
            amount: parsed(&lookup, "MINER_REWARD_AMOUNT").unwrap_or_else(|| Number::from(10)),
        });

        Self {
            host: text("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            peer_timeout: parsed(&lookup, "PEER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.peer_timeout),
            peer_max_concurrency: positive(
                parsed(&lookup, "PEER_MAX_CONCURRENCY"),
                "PEER_MAX_CONCURRENCY",
                defaults.peer_max_concurrency,
            ),
            peer_chain_path: text("PEER_CHAIN_PATH").unwrap_or(defaults.peer_chain_path),
            pow_max_iterations: parsed(&lookup, "POW_MAX_ITERATIONS").or(defaults.pow_max_iterations),
            reward,
        }
    }
}

fn positive(value: Option<usize>, key: &str, default: usize) -> usize {
    match value {
        Some(0) => {
            warn!("config - {key} must be positive, using {default}");
            default
        }
        Some(n) => n,
        None => default,
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("config - ignoring unparseable {key}={raw:?}");
            None
        }
    }
}
