//! Passthrough lookups against the upstream oilfield API.
//!
//! These always answer 200 once the query is valid; upstream failures are
//! replaced by fallback data inside the gateway.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::{api_error, ApiError};
use crate::models::project::Stage;
use crate::models::upstream::{
    ApiCompletionDesignResponse, ApiProjectResponse, ApiWellInformationResponse,
    ProjectLookupQuery, WellLookupQuery,
};
use crate::AppState;

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Missing query parameter: {}", name),
            )
        })
}

/// GET /api/upstream/project?project_number=
pub async fn get_project(
    State(state): State<AppState>,
    Query(query): Query<ProjectLookupQuery>,
) -> Result<Json<ApiProjectResponse>, ApiError> {
    let number = required(query.project_number, "project_number")?;
    Ok(Json(state.oilfield_api.get_project_by_number(&number).await))
}

/// GET /api/upstream/well?well_id=
pub async fn get_well(
    State(state): State<AppState>,
    Query(query): Query<WellLookupQuery>,
) -> Result<Json<ApiWellInformationResponse>, ApiError> {
    let well_id = required(query.well_id, "well_id")?;
    Ok(Json(state.oilfield_api.get_well_info(&well_id).await))
}

/// GET /api/upstream/completion-design?well_id=
pub async fn get_completion_design(
    State(state): State<AppState>,
    Query(query): Query<WellLookupQuery>,
) -> Result<Json<ApiCompletionDesignResponse>, ApiError> {
    let well_id = required(query.well_id, "well_id")?;
    Ok(Json(state.oilfield_api.get_completion_design(&well_id).await))
}

/// GET /api/upstream/stages?well_id=
pub async fn get_stages(
    State(state): State<AppState>,
    Query(query): Query<WellLookupQuery>,
) -> Result<Json<Vec<Stage>>, ApiError> {
    let well_id = required(query.well_id, "well_id")?;
    Ok(Json(state.oilfield_api.stages_for_well(&well_id).await))
}
