use async_trait::async_trait;
use database::{DatabaseError, DatabaseResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::models::User;

/// Repository trait for User persistence
///
/// `add` is staged and only visible to lookups after `commit`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stage an insert; the returned user carries the store-assigned id
    async fn add(&self, user: User) -> DatabaseResult<User>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>>;

    /// Exact match; the service stores and looks up emails lowercased
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    async fn commit(&self) -> DatabaseResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<i32, User>,
    last_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Clones share committed users but each starts with nothing staged, like a
/// fresh `PgUserRepository` per request.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
    staged: Mutex<Vec<User>>,
}

impl Clone for InMemoryUserRepository {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            staged: Mutex::default(),
        }
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users staged through this handle and not yet committed
    pub async fn pending_changes(&self) -> usize {
        self.staged.lock().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, mut user: User) -> DatabaseResult<User> {
        {
            let mut store = self.store.write().await;
            store.last_id += 1;
            user.id = store.last_id;
        }
        self.staged.lock().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn commit(&self) -> DatabaseResult<u64> {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        let mut store = self.store.write().await;

        // Mirrors the unique index on users.email
        for (index, user) in staged.iter().enumerate() {
            let taken = store
                .users
                .values()
                .chain(&staged[..index])
                .any(|other| other.email == user.email);
            if taken {
                return Err(DatabaseError::Generic(format!(
                    "duplicate key value violates unique constraint on email of user {}",
                    user.id
                )));
            }
        }

        let count = staged.len() as u64;
        for user in staged {
            tracing::debug!(user_id = user.id, "Committed user");
            store.users.insert(user.id, user);
        }
        Ok(count)
    }
}
