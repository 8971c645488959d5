//! Health and status endpoints

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::api::server::AppState;
use crate::models::StatusResponse;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "proxy-picker"
        })),
    )
}

/// Pool and exclusion state
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.selector.snapshot_at(Instant::now());

    Json(StatusResponse {
        status: if snapshot.available > 0 { "ok" } else { "direct_only" }.to_string(),
        strategy: state.selector.strategy_name().to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        selector: snapshot,
    })
}
