//! API route definitions

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::server::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/status", get(handlers::health::status))
        .route("/proxy", get(handlers::proxy::get_proxy))
        .route("/proxy/failed", post(handlers::proxy::report_failed))
        .with_state(state)
}
