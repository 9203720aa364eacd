//! # Request Extraction & Validation
//!
//! The [`Validate`] trait covers business rules serde cannot express
//! (non-empty fields, recognizable status names). Handlers take
//! `Result<Json<T>, JsonRejection>` and run both layers through one
//! helper, so malformed JSON and rule violations produce the same
//! structured 422 response.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types that validate business rules beyond deserialization.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization failures to 422.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(value)| value)
        .map_err(|err| AppError::Validation(err.body_text()))
}

/// Extract a JSON body and validate it via [`Validate`].
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}
