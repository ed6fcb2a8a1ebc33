pub mod config;
pub mod handlers;
pub mod routes;

use billed_service::BilledService;

#[derive(Clone)]
pub struct AppState {
    pub service: BilledService,
}
