//! Route definitions for the threat catalogue API.

pub mod charts;
pub mod export;
pub mod health;
pub mod measures;
pub mod tasks;
pub mod threats;

use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router. Shared between `main` and the
/// integration tests so both serve the same surface.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .map(AllowOrigin::exact)
                .unwrap_or_else(|_| AllowOrigin::any()),
        )
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/threats", get(threats::list))
        .route("/threats/filter-options", get(threats::filter_options))
        .route("/threats/{id}", get(threats::get_by_id))
        .route("/threats/{id}/tasks", get(threats::related_tasks))
        .route("/threats/{id}/measures", get(threats::related_measures))
        .route("/measures", get(measures::list))
        .route("/measures/{id}", get(measures::get_by_id))
        .route("/measures/{id}/threats", get(measures::related_threats))
        .route("/tasks", get(tasks::list))
        .route("/tasks/{id}", get(tasks::get_by_id))
        .route("/tasks/{id}/threats", get(tasks::related_threats))
        .route("/tasks/{id}/measures", get(tasks::related_measures))
        .route("/charts/cia", get(charts::cia))
        .route("/charts/cia-combinations", get(charts::cia_combinations))
        .route("/charts/top-violators", get(charts::top_violators))
        .route("/charts/top-objects", get(charts::top_objects))
        .route("/charts/tactics", get(charts::tactics))
        .route("/charts/measure-coverage", get(charts::measure_coverage))
        .route("/export", get(export::export));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
