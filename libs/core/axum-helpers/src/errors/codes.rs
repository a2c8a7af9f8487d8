//! Type-safe error codes for API responses.
//!
//! Each code carries a string identifier for clients, an integer for logs and
//! monitoring, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidArgument;
//! assert_eq!(code.as_str(), "INVALID_ARGUMENT");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// A required argument was missing, out of range or malformed
    InvalidArgument,

    /// Requested resource was not found
    NotFound,

    /// Authenticated user does not own the resource
    Forbidden,

    /// Request conflicts with current resource state
    Conflict,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Storage errors (2000-2999)
    /// A storage operation failed
    OperationFailed,
}

impl ErrorCode {
    /// Get the string representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::OperationFailed => "OPERATION_FAILED",
        }
    }

    /// Get the integer code for logging and monitoring.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: storage errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidArgument => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::OperationFailed => 2001,
        }
    }

    /// Get the default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource was modified or already exists",
            Self::InternalError => "An internal server error occurred",
            Self::OperationFailed => "The operation could not be completed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
