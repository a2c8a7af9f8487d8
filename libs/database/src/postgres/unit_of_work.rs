use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Future returned by a staging closure, borrowing the open transaction.
pub type StageFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>;

struct Pending {
    txn: DatabaseTransaction,
    changes: u64,
}

/// Groups staged inserts, updates and removals into one transaction.
///
/// The transaction is opened by the first [`stage`](Self::stage) call and
/// stays open until [`commit`](Self::commit) or [`discard`](Self::discard).
/// Dropping the unit with pending changes rolls them back. A unit is meant to
/// live for one request; reads go straight to the pool via
/// [`connection`](Self::connection) and do not see staged changes.
pub struct UnitOfWork {
    db: DatabaseConnection,
    pending: Mutex<Option<Pending>>,
}

impl UnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Mutex::new(None),
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Runs one write inside the pending transaction and counts it.
    ///
    /// ```ignore
    /// let model = unit
    ///     .stage(|txn| Box::pin(async move { active_model.insert(txn).await }))
    ///     .await?;
    /// ```
    pub async fn stage<F, T>(&self, operation: F) -> Result<T, DbErr>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> StageFuture<'c, T> + Send,
        T: Send,
    {
        let mut guard = self.pending.lock().await;

        let pending = match guard.take() {
            Some(pending) => pending,
            None => {
                debug!("Opening unit of work transaction");
                Pending {
                    txn: self.db.begin().await?,
                    changes: 0,
                }
            }
        };

        let result = operation(&pending.txn).await;
        let pending = Pending {
            changes: pending.changes + u64::from(result.is_ok()),
            ..pending
        };
        *guard = Some(pending);

        result
    }

    /// Number of staged changes not yet committed.
    pub async fn pending_changes(&self) -> u64 {
        self.pending
            .lock()
            .await
            .as_ref()
            .map_or(0, |pending| pending.changes)
    }

    /// Persists every staged change and returns how many there were.
    ///
    /// Committing with nothing staged is a no-op returning 0.
    pub async fn commit(&self) -> Result<u64, DbErr> {
        let Some(pending) = self.pending.lock().await.take() else {
            return Ok(0);
        };

        let changes = pending.changes;
        pending.txn.commit().await?;
        info!(changes, "Committed unit of work");
        Ok(changes)
    }

    /// Rolls back every staged change.
    pub async fn discard(&self) -> Result<(), DbErr> {
        if let Some(pending) = self.pending.lock().await.take() {
            debug!(changes = pending.changes, "Discarding unit of work");
            pending.txn.rollback().await?;
        }
        Ok(())
    }
}
