use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{api_error, ApiError};
use crate::models::operation::Sector;
use crate::models::timeline::{
    FeedResponse, SectorListResponse, SectorTimelineResponse, TableResponse, WellListResponse,
    WellTimelineResponse,
};
use crate::services::timeline;
use crate::AppState;

pub(crate) fn parse_sector(raw: &str) -> Result<Sector, ApiError> {
    raw.parse::<Sector>()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))
}

/// GET /api/timeline/feed
pub async fn get_feed(State(state): State<AppState>) -> Json<FeedResponse> {
    Json(timeline::feed(&state.store.list().await))
}

/// GET /api/timeline/sectors
pub async fn get_sectors(State(state): State<AppState>) -> Json<SectorListResponse> {
    let snapshot = state.store.snapshot().await;
    Json(SectorListResponse {
        sectors: timeline::active_sectors(&snapshot),
    })
}

/// GET /api/timeline/sectors/{sector}
pub async fn get_sector_timeline(
    State(state): State<AppState>,
    Path(sector): Path<String>,
) -> Result<Json<SectorTimelineResponse>, ApiError> {
    let sector = parse_sector(&sector)?;
    Ok(Json(timeline::sector_view(&state.store.list().await, sector)))
}

/// GET /api/timeline/wells
pub async fn get_wells(State(state): State<AppState>) -> Json<WellListResponse> {
    let snapshot = state.store.snapshot().await;
    Json(WellListResponse {
        wells: timeline::wells_with_operations(&snapshot),
    })
}

/// GET /api/timeline/wells/{well_id}
pub async fn get_well_timeline(
    State(state): State<AppState>,
    Path(well_id): Path<String>,
) -> Result<Json<WellTimelineResponse>, ApiError> {
    let snapshot = state.store.snapshot().await;
    timeline::well_view(&snapshot, &well_id)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown well: {}", well_id)))
}

/// GET /api/timeline/table
pub async fn get_table(State(state): State<AppState>) -> Json<TableResponse> {
    let snapshot = state.store.snapshot().await;
    Json(TableResponse {
        rows: timeline::legacy_table(&snapshot),
    })
}
