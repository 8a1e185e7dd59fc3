use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::PeerError;
use crate::blockchain::Block;

/// A chain together with its reported length, as served by `GET /getChain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: u64,
}

/// Fetches a peer's current chain.
#[async_trait]
pub trait ChainSource: Send + Sync {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError>;
}

/// Retrieves chains over HTTP from other nodes.
pub struct HttpChainSource {
    client: Client,
    path: String,
}

impl HttpChainSource {
    /// `timeout` bounds each peer request as a whole.
    pub fn new(timeout: Duration, path: &str) -> Result<Self, PeerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PeerError::Client)?;
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Ok(Self { client, path })
    }
}

#[async_trait]
impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let url = format!("http://{peer}{}", self.path);
        debug!("fetching chain from {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| PeerError::Request {
                peer: peer.to_string(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(PeerError::Status {
                peer: peer.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let snapshot: ChainSnapshot = resp.json().await.map_err(|e| PeerError::Malformed {
            peer: peer.to_string(),
            reason: e.to_string(),
        })?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::time::Duration;

    use actix_web::{App, HttpResponse, HttpServer, rt, web};
    use serde_json::json;

    use super::{ChainSnapshot, ChainSource, HttpChainSource};
    use crate::blockchain::Ledger;
    use crate::network::PeerError;

    fn source(path: &str) -> HttpChainSource {
        HttpChainSource::new(Duration::from_secs(5), path).unwrap()
    }

    #[actix_web::test]
    async fn fetch_chain_maps_peer_responses() {
        let genesis = Ledger::new().chain().to_vec();
        let served = genesis.clone();
        let snapshot = ChainSnapshot {
            length: genesis.len() as u64,
            chain: genesis.clone(),
        };

        let server = HttpServer::new(move || {
            let snapshot = snapshot.clone();
            let genesis = genesis.clone();
            App::new()
                .route(
                    "/down",
                    web::get().to(|| async { HttpResponse::ServiceUnavailable().finish() }),
                )
                .route(
                    "/typo",
                    web::get().to(move || {
                        let body = json!({ "chain": genesis.clone(), "lenght": 1 });
                        async move { HttpResponse::Ok().json(body) }
                    }),
                )
                .route(
                    "/getChain",
                    web::get().to(move || {
                        let body = snapshot.clone();
                        async move { HttpResponse::Ok().json(body) }
                    }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let peer = server.addrs()[0].to_string();
        let server = server.run();
        let handle = server.handle();
        rt::spawn(server);

        let down = source("/down").fetch_chain(&peer).await;
        assert!(matches!(down, Err(PeerError::Status { status: 503, .. })));

        let typo = source("typo").fetch_chain(&peer).await;
        assert!(matches!(typo, Err(PeerError::Malformed { .. })));

        let ok = source("/getChain").fetch_chain(&peer).await.unwrap();
        assert_eq!(ok.length, 1);
        assert_eq!(ok.chain, served);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn closed_port_is_a_request_error() {
        let peer = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };

        let result = source("/getChain").fetch_chain(&peer).await;
        assert!(matches!(result, Err(PeerError::Request { .. })));
    }
}
