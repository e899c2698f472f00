//! Protection-measure routes: listing, detail, and related threats.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::measure::ProtectionMeasure;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::threat::Threat;
use crate::AppState;

/// GET /api/v1/measures — paged measure catalogue.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Json<ApiResponse<PagedResult<ProtectionMeasure>>> {
    let all = &state.store.protection_measures;
    let items = pagination.slice(all).to_vec();
    ApiResponse::success(PagedResult::new(items, all.len(), &pagination))
}

/// GET /api/v1/measures/:id — measure detail.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProtectionMeasure>>, AppError> {
    let measure = state
        .store
        .measure_by_id(id)
        .ok_or_else(|| AppError::NotFound(format!("Protection measure {id}")))?;
    Ok(ApiResponse::success(measure.clone()))
}

/// GET /api/v1/measures/:id/threats — threats whose measure labels resolve
/// to this measure.
pub async fn related_threats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Threat>>>, AppError> {
    if state.store.measure_by_id(id).is_none() {
        return Err(AppError::NotFound(format!("Protection measure {id}")));
    }
    let threats = state
        .index
        .threats_for_measure(id, &state.store)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(threats))
}
