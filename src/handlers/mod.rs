use axum::{http::StatusCode, Json};

use crate::models::common::ErrorResponse;
use crate::services::operation_store::StoreError;

pub mod export;
pub mod operations;
pub mod project;
pub mod timeline;
pub mod upstream;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

impl From<StoreError> for (StatusCode, Json<ErrorResponse>) {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::NoProject => StatusCode::CONFLICT,
        };
        api_error(status, e.to_string())
    }
}
