use actix_web::{HttpResponse, Responder, get, web};

use super::models::StatsResponse;
use crate::node::Node;

#[get("/stats/")]
pub async fn get_stats(node: web::Data<Node>) -> impl Responder {
    let stats = node.stats();
    HttpResponse::Ok().json(StatsResponse {
        node_id: node.id().to_string(),
        length: stats.length,
        tip_index: stats.tip_index,
        pending_transactions: stats.pending,
        peers: stats.peers,
    })
}
