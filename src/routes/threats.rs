//! Threat routes: filtered listing, detail, related entities, and filter
//! choices.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::Query;

use crate::errors::{ApiResponse, AppError};
use crate::models::measure::ProtectionMeasure;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::task::TacticalTask;
use crate::models::threat::Threat;
use crate::services::filter::{self, FilterSpec, UniqueValues};
use crate::AppState;

/// GET /api/v1/threats — list threats with filters, search, and pagination.
/// Multi-select filters are passed as repeated query keys
/// (`tacticalTasks=a&tacticalTasks=b`).
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<PagedResult<Threat>>> {
    let matched = filter::filter_threats(&state.store.threats, &spec);
    let total = matched.len();
    let items = pagination
        .slice(&matched)
        .iter()
        .map(|t| (*t).clone())
        .collect();
    ApiResponse::success(PagedResult::new(items, total, &pagination))
}

/// GET /api/v1/threats/:id — threat detail.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Threat>>, AppError> {
    let threat = state
        .store
        .threat_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("Threat {id}")))?;
    Ok(ApiResponse::success(threat.clone()))
}

/// GET /api/v1/threats/:id/tasks — tactical tasks resolved from the
/// threat's task labels.
pub async fn related_tasks(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<TacticalTask>>>, AppError> {
    ensure_threat_exists(&state, id)?;
    let tasks = state
        .index
        .tasks_for_threats([id], &state.store)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(tasks))
}

/// GET /api/v1/threats/:id/measures — protection measures resolved from the
/// threat's measure labels.
pub async fn related_measures(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ProtectionMeasure>>>, AppError> {
    ensure_threat_exists(&state, id)?;
    let measures = state
        .index
        .measures_for_threats([id], &state.store)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(measures))
}

/// GET /api/v1/threats/filter-options — distinct values for the filter
/// choice lists, split the same way the filter matches them.
pub async fn filter_options(
    State(state): State<AppState>,
) -> Json<ApiResponse<UniqueValues>> {
    ApiResponse::success(filter::unique_values(&state.store.threats))
}

fn ensure_threat_exists(state: &AppState, id: i64) -> Result<(), AppError> {
    state
        .store
        .threat_by_id(id)
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Threat {id}")))
}
