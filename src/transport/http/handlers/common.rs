use crate::app::AppError;
use crate::domain::model::ValidationError;
use axum::extract::rejection::{JsonRejection, PathRejection};

/// Malformed or incomplete JSON bodies are validation failures (422), reported before any
/// database call.
pub fn json_rejection(err: JsonRejection, expected: &str) -> AppError {
    AppError::Validation(ValidationError::Malformed(format!(
        "Invalid JSON body: {} (expected: {})",
        err.body_text(),
        expected
    )))
}

/// Non-integer path ids.
pub fn path_rejection(err: PathRejection) -> AppError {
    AppError::Validation(ValidationError::Malformed(format!(
        "Invalid id in path: {}",
        err.body_text()
    )))
}
