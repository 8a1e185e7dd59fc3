mod api;
mod blockchain;
mod config;
mod network;
mod node;
mod transaction;

use std::sync::Arc;

use actix_web::{App, HttpServer, rt, web};
use dotenvy::dotenv;
use log::{info, warn};

use config::NodeConfig;
use network::HttpChainSource;
use node::Node;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let source = HttpChainSource::new(config.peer_timeout, &config.peer_chain_path)
        .map_err(std::io::Error::other)?;
    let node = web::Data::new(Node::new(&config, Arc::new(source)));

    info!(
        "⛓️ Starting ledger node {} at http://{}:{}",
        node.id(),
        config.host,
        config.port
    );

    // Let running proof searches bail out instead of holding up shutdown.
    let on_signal = node.clone();
    rt::spawn(async move {
        if rt::signal::ctrl_c().await.is_ok() {
            warn!("shutdown requested, cancelling proof searches");
            on_signal.cancel_mining();
        }
    });

    let state = node.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
