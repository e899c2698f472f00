//! Chart-data routes. Every endpoint accepts the same filter query as the
//! threat list and aggregates the filtered subset, so the dashboard charts
//! follow the active filters.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::errors::ApiResponse;
use crate::models::threat::Threat;
use crate::services::charts::{self, ChartPoint};
use crate::services::filter::{self, FilterSpec};
use crate::AppState;

/// Optional cut-off override for the top-N charts.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/charts/cia — independent CIA flag counts.
pub async fn cia(
    State(state): State<AppState>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    with_filtered(&state, &spec, |threats| charts::cia_distribution(threats))
}

/// GET /api/v1/charts/cia-combinations — the 7 non-empty CIA subsets.
pub async fn cia_combinations(
    State(state): State<AppState>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    with_filtered(&state, &spec, |threats| charts::cia_combinations(threats))
}

/// GET /api/v1/charts/top-violators — most frequent violator labels.
pub async fn top_violators(
    State(state): State<AppState>,
    Query(top): Query<TopQuery>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    let n = top.limit.unwrap_or(charts::TOP_VIOLATORS);
    with_filtered(&state, &spec, |threats| charts::top_violators(threats, n))
}

/// GET /api/v1/charts/top-objects — most frequent affected-object labels.
pub async fn top_objects(
    State(state): State<AppState>,
    Query(top): Query<TopQuery>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    let n = top.limit.unwrap_or(charts::TOP_OBJECTS);
    with_filtered(&state, &spec, |threats| charts::top_objects(threats, n))
}

/// GET /api/v1/charts/tactics — threat count per tactical task, uncapped.
pub async fn tactics(
    State(state): State<AppState>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    with_filtered(&state, &spec, |threats| charts::tactic_distribution(threats))
}

/// GET /api/v1/charts/measure-coverage — threats with vs. without real
/// protection measures.
pub async fn measure_coverage(
    State(state): State<AppState>,
    Query(spec): Query<FilterSpec>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    with_filtered(&state, &spec, |threats| charts::measure_coverage(threats))
}

fn with_filtered(
    state: &AppState,
    spec: &FilterSpec,
    build: impl FnOnce(&[&Threat]) -> Vec<ChartPoint>,
) -> Json<ApiResponse<Vec<ChartPoint>>> {
    let filtered = filter::filter_threats(&state.store.threats, spec);
    ApiResponse::success(build(&filtered))
}
