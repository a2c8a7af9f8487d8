pub mod codes;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "Task 7 was modified concurrently",
///   "details": null
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g. the offending argument)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain errors convert into this type so every service speaks the same
/// status/code contract. Server-side variants never expose their message to
/// the client; it is logged instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {message}")]
    BadRequest {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::OperationFailed(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { .. } => ErrorCode::InvalidArgument,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::OperationFailed(_) => ErrorCode::OperationFailed,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    /// Builds the response body without touching the logger.
    pub fn to_error_response(&self) -> ErrorResponse {
        let code = self.error_code();
        let (message, details) = match self {
            AppError::BadRequest { message, details } => (message.clone(), details.clone()),
            AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => (msg.clone(), None),
            AppError::OperationFailed(_) | AppError::InternalServerError(_) => {
                (code.default_message().to_string(), None)
            }
        };

        ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        match &self {
            AppError::OperationFailed(msg) | AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "{}", msg);
            }
            AppError::Conflict(msg) => {
                tracing::warn!(error_code = code.code(), "Conflict: {}", msg);
            }
            other => {
                tracing::info!(error_code = code.code(), "{}", other);
            }
        }

        (self.status(), Json(self.to_error_response())).into_response()
    }
}
