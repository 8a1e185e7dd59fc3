use actix_web::{HttpResponse, Responder, get, web};

use super::models::HealthResponse;
use crate::node::Node;

#[get("/health/")]
pub async fn health_check(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        node_id: node.id().to_string(),
    })
}
