use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::ApiError;
use crate::models::operation::{
    AddOperationsRequest, Operation, OperationDraft, OperationListQuery, OperationListResponse,
    QuickAddRequest,
};
use crate::AppState;

/// GET /api/operations[?well_id=]
pub async fn list_operations(
    State(state): State<AppState>,
    Query(query): Query<OperationListQuery>,
) -> Json<OperationListResponse> {
    let operations: Vec<Operation> = state
        .store
        .list()
        .await
        .into_iter()
        .filter(|op| query.well_id.as_ref().is_none_or(|id| &op.well_id == id))
        .collect();

    Json(OperationListResponse {
        total: operations.len(),
        operations,
    })
}

/// POST /api/operations
///
/// Adds a batch sharing one start time. Returns the created operations with
/// their end times as resolved against the whole project.
pub async fn add_operations(
    State(state): State<AppState>,
    Json(payload): Json<AddOperationsRequest>,
) -> Result<(StatusCode, Json<OperationListResponse>), ApiError> {
    info!(count = payload.operations.len(), "Add operations request received");

    let operations = state.store.add(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(OperationListResponse {
            total: operations.len(),
            operations,
        }),
    ))
}

/// POST /api/operations/quick
pub async fn quick_add_operation(
    State(state): State<AppState>,
    Json(payload): Json<QuickAddRequest>,
) -> Result<(StatusCode, Json<Operation>), ApiError> {
    let operation = state.store.quick_add(payload).await?;
    Ok((StatusCode::CREATED, Json(operation)))
}

pub async fn edit_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OperationDraft>,
) -> Result<Json<Operation>, ApiError> {
    Ok(Json(state.store.edit(&id, payload).await?))
}

pub async fn toggle_operation_completed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Operation>, ApiError> {
    Ok(Json(state.store.toggle_completed(&id).await?))
}

pub async fn delete_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Operation>, ApiError> {
    Ok(Json(state.store.delete(&id).await?))
}
