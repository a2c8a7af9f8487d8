use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{ArgumentError, DatabaseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("Task not found: {0}")]
    NotFound(i32),

    #[error("Task {task_id} belongs to another user")]
    Forbidden { task_id: i32 },

    #[error("Task {0} was modified concurrently")]
    Conflict(i32),

    #[error("Task operation '{operation}' failed")]
    OperationFailed {
        operation: &'static str,
        #[source]
        source: DatabaseError,
    },
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    /// Name of the rejected argument, for `InvalidArgument` errors.
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            TaskError::InvalidArgument(err) => Some(err.argument()),
            _ => None,
        }
    }
}

/// Logs a storage failure with its operation and id, then wraps it.
pub(crate) fn storage_failure(
    operation: &'static str,
    id: i32,
) -> impl FnOnce(DatabaseError) -> TaskError {
    move |source| {
        tracing::error!(operation, id, error = %source, "Task storage operation failed");
        TaskError::OperationFailed { operation, source }
    }
}

/// Like [`storage_failure`], but a concurrency signal becomes `Conflict`.
pub(crate) fn update_failure(
    operation: &'static str,
    task_id: i32,
) -> impl FnOnce(DatabaseError) -> TaskError {
    move |source| {
        if source.is_conflict() {
            tracing::warn!(operation, task_id, error = %source, "Task update conflicted");
            TaskError::Conflict(task_id)
        } else {
            storage_failure(operation, task_id)(source)
        }
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidArgument(arg) => AppError::BadRequest {
                message: arg.to_string(),
                details: serde_json::to_value(&arg).ok(),
            },
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::Forbidden { .. } => {
                AppError::Forbidden("You do not have access to this task".to_string())
            }
            TaskError::Conflict(id) => {
                AppError::Conflict(format!("Task {} was modified by another request", id))
            }
            TaskError::OperationFailed { operation, source } => {
                AppError::OperationFailed(format!("Task {} failed: {}", operation, source))
            }
        }
    }
}

impl IntoResponse for TaskError {
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
                TaskError::InvalidArgument(ArgumentError::Missing { argument: "task" }),
                StatusCode::BAD_REQUEST,
            ),
            (TaskError::NotFound(3), StatusCode::NOT_FOUND),
            (TaskError::Forbidden { task_id: 3 }, StatusCode::FORBIDDEN),
            (TaskError::Conflict(3), StatusCode::CONFLICT),
            (
                TaskError::OperationFailed {
                    operation: "delete",
                    source: DatabaseError::Timeout("pool".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_operation_failed_keeps_source_but_hides_it_from_clients() {
        let err = TaskError::OperationFailed {
            operation: "list_by_user",
            source: DatabaseError::Timeout("acquire after 8s".into()),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Store operation timed out: acquire after 8s"));

        let body = AppError::from(err).to_error_response();
        assert!(!body.message.contains("8s"));
    }

    #[test]
    fn test_update_failure_maps_conflict() {
        let err = update_failure("update", 5)(DatabaseError::Conflict("stale".into()));
        assert!(matches!(err, TaskError::Conflict(5)));

        let err = update_failure("update", 5)(DatabaseError::Generic("disk".into()));
        assert!(matches!(err, TaskError::OperationFailed { operation: "update", .. }));
    }
}
