use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{NewTxRequest, NewTxResponse};
use crate::node::Node;

/// Queue a transaction for the next mined block.
#[post("/addTransaction")]
pub async fn add_transaction(
    node: web::Data<Node>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        receiver,
        amount,
    } = body.into_inner();

    let (Some(sender), Some(receiver), Some(amount)) = (sender, receiver, amount) else {
        warn!("POST /addTransaction - rejected: missing fields");
        return HttpResponse::BadRequest().body("sender, receiver and amount are required");
    };

    let index = node.submit_transaction(sender, receiver, amount);
    info!("POST /addTransaction - queued for block #{index}");

    HttpResponse::Created().json(NewTxResponse {
        message: format!("this transaction will be added to block {index}"),
        index,
    })
}
