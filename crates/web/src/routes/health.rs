use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::dashboard::{LoadState, LoadStatus};
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// State of the absence data.
    pub load_state: LoadStatus,
}

/// GET /health -- returns service health and the data load state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.dashboard.snapshot().await;

    let status = match snapshot {
        LoadState::Failed(_) => "degraded",
        _ => "ok",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        load_state: snapshot.status(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
