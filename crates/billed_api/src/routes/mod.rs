use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::{bills, health_check};
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/bills", get(bills::list_bills).post(bills::upload_receipt))
        .route("/bills/{key}", put(bills::submit_bill))
        .route("/bills/{key}/receipt", get(bills::get_receipt))
        .with_state(state)
}
