//! Proxy selection handlers

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::server::AppState;
use crate::models::{FailureReport, ProxyResponse};

const PROXY_URL_KEY: &str = "proxy_url";

/// Hand out one available proxy, or `direct` when all are excluded
pub async fn get_proxy(State(state): State<AppState>) -> Json<ProxyResponse> {
    let selection = state.selector.select();
    debug!(url = %selection, "Selected proxy");

    Json(ProxyResponse::from(selection))
}

/// Record a failed proxy
///
/// The body is decoded by hand so a malformed report still gets an empty
/// 200; the caller has no use for an error here.
pub async fn report_failed(State(state): State<AppState>, body: Bytes) -> StatusCode {
    match decode_failure_report(&body) {
        Some(report) => {
            state.selector.mark_failed(&report.proxy_url, Instant::now());
            info!(proxy_url = %report.proxy_url, "Marked proxy as failed");
        }
        None => {
            debug!(len = body.len(), "Ignoring malformed failure report");
        }
    }

    StatusCode::OK
}

/// Decode the first JSON value in `body` as a failure report.
///
/// Anything after that value is left unread, and the `proxy_url` key is
/// matched without regard to ASCII case, an exact match taking precedence.
fn decode_failure_report(body: &[u8]) -> Option<FailureReport> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()?
        .ok()?;
    let object = value.as_object()?;

    let proxy_url = object.get(PROXY_URL_KEY).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(PROXY_URL_KEY))
            .map(|(_, value)| value)
    })?;

    Some(FailureReport {
        proxy_url: proxy_url.as_str()?.to_string(),
    })
}
