/// Unified storage error type for repository operations
///
/// Repositories report every failure through this type; services decide how
/// each class surfaces to their callers (a `Conflict` on update, everything
/// else as a failed operation).
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The store did not answer in time (pool acquire, statement timeout)
    #[error("Store operation timed out: {0}")]
    Timeout(String),

    /// A persisted record changed since it was loaded
    #[error("Concurrent modification: {0}")]
    Conflict(String),

    /// Connection could not be established or was lost
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other PostgreSQL-specific error (SeaORM)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[source] sea_orm::DbErr),

    /// Generic store error
    #[error("Store error: {0}")]
    Generic(String),
}

impl DatabaseError {
    /// Whether this failure is a concurrency-conflict signal.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DatabaseError::Conflict(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DatabaseError::Timeout(_))
    }
}

#[cfg(feature = "postgres")]
impl From<sea_orm::DbErr> for DatabaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{ConnAcquireErr, DbErr};

        match err {
            DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
                DatabaseError::Timeout(err.to_string())
            }
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
                DatabaseError::ConnectionFailed(err.to_string())
            }
            DbErr::RecordNotUpdated => DatabaseError::Conflict(err.to_string()),
            other => DatabaseError::Postgres(other),
        }
    }
}

/// Result type alias for repository operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
