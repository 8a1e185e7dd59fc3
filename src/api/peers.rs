use actix_web::{HttpResponse, Responder, post, web};
use log::warn;

use super::models::{ConnectRequest, ConnectResponse};
use crate::node::Node;

/// Register peer nodes; answers with the full peer set.
#[post("/connectNode")]
pub async fn connect_node(
    node: web::Data<Node>,
    body: web::Json<ConnectRequest>,
) -> impl Responder {
    let Some(addresses) = body.into_inner().nodes else {
        warn!("POST /connectNode - rejected: no nodes given");
        return HttpResponse::BadRequest().body("nodes is required");
    };

    match node.register_peers(&addresses) {
        Ok(total_nodes) => HttpResponse::Created().json(ConnectResponse {
            message: format!("{} peer(s) known to this node", total_nodes.len()),
            total_nodes,
        }),
        Err(err) => {
            warn!("POST /connectNode - rejected: {err}");
            HttpResponse::BadRequest().body(err.to_string())
        }
    }
}
