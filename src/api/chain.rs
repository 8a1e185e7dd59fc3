use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info, warn};

use super::models::{MineResponse, ReplaceResponse, ValidResponse};
use crate::node::Node;

/// Mine a new block on top of the current tip, sealing the pending pool.
/// The proof search runs on the blocking pool.
#[get("/mineBlock")]
pub async fn mine_block(node: web::Data<Node>) -> impl Responder {
    let worker = node.clone();
    match web::block(move || worker.mine()).await {
        Ok(Ok(block)) => HttpResponse::Ok().json(MineResponse::from(block)),
        Ok(Err(err)) => {
            warn!("GET /mineBlock - {err}");
            HttpResponse::ServiceUnavailable().body(format!("mining did not finish: {err}"))
        }
        Err(err) => {
            error!("GET /mineBlock - mining task failed: {err}");
            HttpResponse::InternalServerError().body("mining task failed")
        }
    }
}

/// Get the full chain and its length.
#[get("/getChain")]
pub async fn get_chain(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(node.get_chain())
}

/// Validate the whole local chain.
#[get("/isValid")]
pub async fn is_valid(node: web::Data<Node>) -> impl Responder {
    let valid = node.is_valid();
    let message = if valid {
        "the chain is valid"
    } else {
        "the chain is not valid"
    };
    HttpResponse::Ok().json(ValidResponse {
        message: message.to_string(),
        valid,
    })
}

/// Run a consensus round against every registered peer.
#[get("/replaceChain")]
pub async fn replace_chain(node: web::Data<Node>) -> impl Responder {
    let resolution = node.resolve_consensus().await;
    let message = if resolution.replaced {
        "chain replaced by a longer peer chain"
    } else {
        "no replacement, the local chain is authoritative"
    };
    info!(
        "GET /replaceChain - replaced={} length={}",
        resolution.replaced,
        resolution.chain.len()
    );
    HttpResponse::Ok().json(ReplaceResponse {
        message: message.to_string(),
        replaced: resolution.replaced,
        chain: resolution.chain,
    })
}
