//! Health check endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the model failed to load
    pub status: String,
    pub model_loaded: bool,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub version: String,
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let model_loaded = state.model.is_loaded();
    let status = if model_loaded { "ok" } else { "degraded" };
    Json(HealthResponse {
        status: status.to_string(),
        model_loaded,
        uptime_seconds: state.uptime_seconds(),
        started_at: state.started_at_utc,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
