//! Tactical-task routes: listing, detail, related threats and measures.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::measure::ProtectionMeasure;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::task::TacticalTask;
use crate::models::threat::Threat;
use crate::AppState;

/// GET /api/v1/tasks — paged task catalogue.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Json<ApiResponse<PagedResult<TacticalTask>>> {
    let all = &state.store.tactical_tasks;
    let items = pagination.slice(all).to_vec();
    ApiResponse::success(PagedResult::new(items, all.len(), &pagination))
}

/// GET /api/v1/tasks/:id — task detail.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TacticalTask>>, AppError> {
    let task = state
        .store
        .task_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("Tactical task {id}")))?;
    Ok(ApiResponse::success(task.clone()))
}

/// GET /api/v1/tasks/:id/threats — threats whose task labels resolve to
/// this task.
pub async fn related_threats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Threat>>>, AppError> {
    ensure_task_exists(&state, id)?;
    let threats = state
        .index
        .threats_for_task(id, &state.store)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(threats))
}

/// GET /api/v1/tasks/:id/measures — measures covering the threats of this
/// task, resolved through the threat collection.
pub async fn related_measures(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ProtectionMeasure>>>, AppError> {
    ensure_task_exists(&state, id)?;
    let threat_ids: Vec<i64> = state
        .index
        .threats_for_task(id, &state.store)
        .iter()
        .map(|t| t.id)
        .collect();
    let measures = state
        .index
        .measures_for_threats(threat_ids, &state.store)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(measures))
}

fn ensure_task_exists(state: &AppState, id: i64) -> Result<(), AppError> {
    state
        .store
        .task_by_id(id)
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Tactical task {id}")))
}
