//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail: dataset status and collection sizes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub threats: usize,
    pub measures: usize,
    pub tasks: usize,
    pub generated_at: DateTime<Utc>,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — reports dataset state. An empty dataset (failed load)
/// is reported as `empty`, not as an error; the service still serves.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let store = &state.store;
    let status = if store.threats.is_empty() {
        "empty"
    } else {
        "ok"
    };
    ApiResponse::success(HealthStatus {
        status: status.to_string(),
        threats: store.threats.len(),
        measures: store.protection_measures.len(),
        tasks: store.tactical_tasks.len(),
        generated_at: store.metadata.generated_at,
    })
}
