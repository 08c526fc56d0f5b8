use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of stored interviews.
    pub interviews: usize,
    /// Transcription simulations currently running.
    pub in_flight: usize,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
}

/// GET /health -- returns service status, store/dispatcher counters and the upload limit.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        interviews: state.interviews.count().await,
        in_flight: state.interviews.in_flight(),
        max_upload_bytes: state.config.max_upload_bytes,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
