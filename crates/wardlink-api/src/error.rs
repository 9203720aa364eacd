//! # API Error Types
//!
//! Maps the domain [`Reject`] taxonomy to structured HTTP responses:
//! status code, machine-readable error code, and the precomposed
//! user-facing message. Infrastructure faults are logged server-side and
//! never leak detail to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use wardlink_core::Reject;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "RATE_LIMITED").
    pub code: String,
    /// Human-readable, user-renderable message.
    pub message: String,
    /// Additional context, present only where actionable (rate limiting).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type implementing [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Input failed validation (422).
    #[error("{0}")]
    Validation(String),

    /// Credential or token mismatch (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Caller does not own the resource (403).
    #[error("{0}")]
    Forbidden(String),

    /// Precondition or status conflict (409).
    #[error("{0}")]
    Conflict(String),

    /// Too many attempts (429). Carries minutes until the window expires.
    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_minutes: u32,
    },

    /// Internal fault (500). Message is logged but not returned.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Internal faults are logged for operators, hidden from clients.
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                "Something went wrong on our side, please try again.".to_string()
            }
            other => other.to_string(),
        };

        let details = match &self {
            Self::RateLimited {
                retry_after_minutes,
                ..
            } => Some(serde_json::json!({ "retry_after_minutes": retry_after_minutes })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<Reject> for AppError {
    fn from(reject: Reject) -> Self {
        let message = reject.to_string();
        match reject {
            Reject::InvalidFormat(_) => Self::Validation(message),
            Reject::NotFound(_) => Self::NotFound(message),
            Reject::Unauthorized => Self::Forbidden(message),
            Reject::InvalidToken | Reject::InvalidPin => Self::Unauthorized(message),
            Reject::Blocked(_)
            | Reject::AlreadyLinked(_)
            | Reject::NotAvailable(_)
            | Reject::NotConfigured => Self::Conflict(message),
            Reject::RateLimited {
                retry_after_minutes,
            } => Self::RateLimited {
                message,
                retry_after_minutes,
            },
            Reject::Store(err) => Self::Internal(err.to_string()),
        }
    }
}
