mod chain;
mod health;
pub mod models;
mod peers;
mod stats;
mod tx;

use actix_web::web::{self, ServiceConfig};

/// Routes keep the paths other nodes poll (`/getChain` in particular), so
/// they live at the root rather than under a versioned scope.
pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(chain::mine_block)
        .service(chain::get_chain)
        .service(chain::is_valid)
        .service(chain::replace_chain)
        .service(tx::add_transaction)
        .service(peers::connect_node)
        .service(
            web::scope("/api/v1")
                .service(health::health_check)
                .service(stats::get_stats),
        );
}
