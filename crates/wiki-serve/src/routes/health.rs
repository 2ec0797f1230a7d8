//! Health check endpoint.
//!
//! A wiki that cannot save pages is not healthy, so the probe checks the
//! data directory rather than just answering.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    data_dir: String,
    data_dir_writable: bool,
    version: &'static str,
}

/// `200` with `"ok"` when the data directory accepts saves, otherwise
/// `503` with `"degraded"`.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.pages.storage();
    let writable = storage.is_writable().await;

    let (code, status) = if writable {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!(data_dir = %storage.data_dir().display(), "data directory not writable");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            data_dir: storage.data_dir().display().to_string(),
            data_dir_writable: writable,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
