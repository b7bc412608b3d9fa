//! CSV download endpoints
//!
//! Routes take the whole last path segment (`{name}.csv`) and strip the
//! extension here.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::{api_error, timeline::parse_sector, ApiError};
use crate::services::{csv_export, timeline};
use crate::AppState;

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

fn strip_csv(segment: &str) -> &str {
    segment.strip_suffix(".csv").unwrap_or(segment)
}

/// GET /api/export/feed.csv
pub async fn export_feed(State(state): State<AppState>) -> Response {
    let operations = state.store.list().await;
    csv_response(
        csv_export::FEED_FILENAME,
        csv_export::operations_csv(&operations),
    )
}

/// GET /api/export/sectors/{sector}.csv
pub async fn export_sector(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, ApiError> {
    let sector = parse_sector(strip_csv(&segment))?;
    let operations = timeline::sector_operations(&state.store.list().await, sector);

    Ok(csv_response(
        &csv_export::sector_filename(sector),
        csv_export::operations_csv(&operations),
    ))
}

/// GET /api/export/wells/{well_id}.csv
pub async fn export_well(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, ApiError> {
    let well_id = strip_csv(&segment);
    let snapshot = state.store.snapshot().await;
    let operations = timeline::well_operations(&snapshot.operations, well_id);

    if operations.is_empty() && snapshot.well(well_id).is_none() {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Unknown well: {}", well_id),
        ));
    }

    Ok(csv_response(
        &csv_export::well_filename(&timeline::well_name(&snapshot, well_id)),
        csv_export::operations_csv(&operations),
    ))
}

/// GET /api/export/table.csv
pub async fn export_table(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot().await;
    csv_response(
        csv_export::TABLE_FILENAME,
        csv_export::table_csv(&timeline::legacy_table(&snapshot)),
    )
}
