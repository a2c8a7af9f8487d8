use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{ArgumentError, DatabaseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("User operation '{operation}' failed")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: DatabaseError,
    },
}

pub type UserResult<T> = Result<T, UserError>;

/// Logs a storage failure with its operation and lookup key, then wraps it.
pub(crate) fn storage_failure<'a>(
    operation: &'static str,
    key: &'a str,
) -> impl FnOnce(DatabaseError) -> UserError + 'a {
    move |source| {
        tracing::error!(operation, key, error = %source, "User storage operation failed");
        UserError::OperationFailed { operation, source }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidArgument(arg) => AppError::BadRequest {
                message: arg.to_string(),
                details: serde_json::to_value(&arg).ok(),
            },
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("User with email '{}' already exists", email))
            }
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("Password hash error: {}", msg))
            }
            UserError::OperationFailed { operation, source } => {
                AppError::OperationFailed(format!("User {} failed: {}", operation, source))
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                UserError::InvalidArgument(ArgumentError::Missing { argument: "user" }),
                StatusCode::BAD_REQUEST,
            ),
            (
                UserError::DuplicateEmail("ana@example.com".into()),
                StatusCode::CONFLICT,
            ),
            (
                UserError::PasswordHash("invalid PHC string".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::OperationFailed {
                    operation: "register",
                    source: DatabaseError::ConnectionFailed("refused".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_password_hash_detail_is_not_returned() {
        let body = AppError::from(UserError::PasswordHash("salt too short".into()))
            .to_error_response();
        assert!(!body.message.contains("salt"));
    }
}
