use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{api_error, ApiError};
use crate::models::operation::Personnel;
use crate::models::project::{
    CompletionTypeRequest, ProjectConfiguration, ProjectSummaryResponse, SetupProjectRequest,
    StageProgressResponse,
};
use crate::services::{project_setup::import_project, timeline::stage_progress};
use crate::AppState;

/// Import a project from the upstream system and make it the active one.
///
/// POST /api/project/setup
///
/// Upstream failures never fail the request: the import falls back to
/// development data, so any non-empty project number succeeds.
pub async fn setup_project(
    State(state): State<AppState>,
    Json(payload): Json<SetupProjectRequest>,
) -> Result<Json<ProjectSummaryResponse>, ApiError> {
    let number = payload.number.trim();
    if number.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Project number is required",
        ));
    }

    info!(project_number = %number, "Project setup requested");

    let setup = import_project(&state.oilfield_api, number).await;
    let project = state.store.setup_project(setup).await;

    Ok(Json(project.into()))
}

pub async fn get_project(State(state): State<AppState>) -> Json<ProjectSummaryResponse> {
    Json(state.store.snapshot().await.into())
}

pub async fn update_configuration(
    State(state): State<AppState>,
    Json(payload): Json<ProjectConfiguration>,
) -> Result<Json<ProjectConfiguration>, ApiError> {
    let configuration = state.store.update_configuration(payload).await?;
    Ok(Json(configuration))
}

pub async fn update_personnel(
    State(state): State<AppState>,
    Json(payload): Json<Personnel>,
) -> Result<Json<Personnel>, ApiError> {
    let personnel = state.store.update_personnel(payload).await?;
    Ok(Json(personnel))
}

pub async fn set_completion_type(
    State(state): State<AppState>,
    Json(payload): Json<CompletionTypeRequest>,
) -> Result<Json<CompletionTypeRequest>, ApiError> {
    let completion_type = state
        .store
        .set_completion_type(payload.completion_type)
        .await?;
    Ok(Json(CompletionTypeRequest { completion_type }))
}

/// GET /api/wells/{well_id}/stages
pub async fn get_stage_progress(
    State(state): State<AppState>,
    Path(well_id): Path<String>,
) -> Result<Json<StageProgressResponse>, ApiError> {
    let snapshot = state.store.snapshot().await;
    stage_progress(&snapshot, &well_id)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown well: {}", well_id)))
}
