//! Application error type and its HTTP representation.
//!
//! Every failure that can leave a handler is an [`AppError`]. Each variant
//! maps to one HTTP status and a stable machine-readable `code`:
//!
//! | Variant                | Status | Code                  |
//! |------------------------|--------|-----------------------|
//! | `Validation`           | 400    | `validation_error`    |
//! | `NotFound`             | 404    | `not_found`           |
//! | `CollisionExhausted`   | 500    | `collision_exhausted` |
//! | `StorageUnavailable`   | 500    | `storage_unavailable` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input. Never retryable.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Well-formed short code with no mapping behind it.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Every candidate code drawn for a create collided with an existing one.
    /// Retrying the whole request draws fresh randomness.
    #[error("{message}")]
    CollisionExhausted { message: String, details: Value },

    /// The storage engine failed (I/O, lock timeout, closed pool).
    #[error("{message}")]
    StorageUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn collision_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CollisionExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn storage_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::CollisionExhausted { .. } | AppError::StorageUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Consumes the error into its serializable form.
    pub fn to_error_info(self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::CollisionExhausted { message, details } => {
                ("collision_exhausted", message, details)
            }
            AppError::StorageUnavailable { message, details } => {
                ("storage_unavailable", message, details)
            }
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "storage failure");

        AppError::storage_unavailable("Storage unavailable", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}
