//! Export route: serialize the filtered threat collection for download.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::Response,
};
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::export::{self, ExportFormat};
use crate::services::filter::{self, FilterSpec};
use crate::AppState;

/// Export format selection; defaults to JSON when omitted.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<ExportFormat>,
}

/// GET /api/v1/export — download the filtered threats in the requested
/// format. Accepts the same filter query as the threat list.
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Query(spec): Query<FilterSpec>,
) -> Result<Response, AppError> {
    let format = query.format.unwrap_or(ExportFormat::Json);
    let filtered = filter::filter_threats(&state.store.threats, &spec);
    let body = export::export_threats(&filtered, format)?;

    tracing::info!(
        format = format.file_extension(),
        threats = filtered.len(),
        "Exporting threat collection"
    );

    let disposition = format!(
        "attachment; filename=\"threats.{}\"",
        format.file_extension()
    );
    Response::builder()
        .header(header::CONTENT_TYPE, HeaderValue::from_static(format.content_type()))
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(body.into())
        .map_err(|e| AppError::Internal(e.to_string()))
}
