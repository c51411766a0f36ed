//! `AppError` → HTTP response mapping.

use crate::app::AppError;
use crate::transport::http::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Validation(_) => "validation_error",
            AppError::Storage(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = match &self {
            AppError::Storage(e) => {
                // Log the actual error, return a generic message.
                tracing::error!("storage error: {}", e);
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorResponse {
            error: self.kind().to_string(),
            detail,
        };
        (self.status_code(), Json(body)).into_response()
    }
}
