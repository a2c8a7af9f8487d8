use async_trait::async_trait;
use database::{DatabaseError, DatabaseResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::models::{Task, TaskPriority, TaskStatus};

/// Repository trait for Task persistence
///
/// Writes (`add`, `update`, `remove`) are staged and only become visible to
/// reads after `commit`. Implementations report every failure as a
/// [`DatabaseError`]; a stale update is reported as `DatabaseError::Conflict`
/// either when staged or when committed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks owned by `owner_id`
    async fn find_by_owner(&self, owner_id: i32) -> DatabaseResult<Vec<Task>>;

    /// Stage an insert; the returned task carries the store-assigned id
    async fn add(&self, task: Task) -> DatabaseResult<Task>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Task>>;

    /// Stage an update; the returned task carries the next version
    async fn update(&self, task: Task) -> DatabaseResult<Task>;

    /// Stage a removal
    async fn remove(&self, task: Task) -> DatabaseResult<()>;

    async fn find_by_owner_and_status(
        &self,
        status: TaskStatus,
        owner_id: i32,
    ) -> DatabaseResult<Vec<Task>>;

    async fn find_by_owner_and_priority(
        &self,
        priority: TaskPriority,
        owner_id: i32,
    ) -> DatabaseResult<Vec<Task>>;

    /// Persist every staged change, returning how many there were
    async fn commit(&self) -> DatabaseResult<u64>;
}

#[derive(Debug, Clone)]
enum Staged {
    Insert(Task),
    Update(Task),
    Remove(i32),
}

#[derive(Debug, Default)]
struct Store {
    tasks: BTreeMap<i32, Task>,
    last_id: i32,
}

/// In-memory implementation of TaskRepository (for development/testing)
///
/// Committed tasks are shared by every clone; staged changes are not. A
/// clone starts with an empty set of staged changes, so each request works
/// on its own handle the same way it gets its own `PgTaskRepository`.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
    staged: Mutex<Vec<Staged>>,
}

impl Clone for InMemoryTaskRepository {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            staged: Mutex::default(),
        }
    }
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already-committed tasks; tasks with id 0 get a fresh id.
    pub async fn seed(&self, tasks: impl IntoIterator<Item = Task>) -> Vec<Task> {
        let mut store = self.store.write().await;
        let mut seeded = Vec::new();
        for mut task in tasks {
            if task.id == 0 {
                store.last_id += 1;
                task.id = store.last_id;
            } else {
                store.last_id = store.last_id.max(task.id);
            }
            store.tasks.insert(task.id, task.clone());
            seeded.push(task);
        }
        seeded
    }

    /// Changes staged through this handle and not yet committed
    pub async fn pending_changes(&self) -> usize {
        self.staged.lock().await.len()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn filter_owned<F>(&self, owner_id: i32, predicate: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool,
    {
        self.store
            .read()
            .await
            .tasks
            .values()
            .filter(|task| task.owner_id == owner_id && predicate(task))
            .cloned()
            .collect()
    }
}

/// Checks a staged change against the committed tasks.
fn check_staged(tasks: &BTreeMap<i32, Task>, change: &Staged) -> DatabaseResult<()> {
    match change {
        Staged::Insert(_) => Ok(()),
        Staged::Update(task) => match tasks.get(&task.id) {
            Some(stored) if stored.version + 1 == task.version => Ok(()),
            Some(stored) => Err(DatabaseError::Conflict(format!(
                "task {} is at version {}, update expected {}",
                task.id,
                stored.version,
                task.version - 1
            ))),
            None => Err(DatabaseError::Conflict(format!(
                "task {} no longer exists",
                task.id
            ))),
        },
        Staged::Remove(id) if tasks.contains_key(id) => Ok(()),
        Staged::Remove(id) => Err(DatabaseError::Generic(format!(
            "task {} does not exist",
            id
        ))),
    }
}

/// Same columns `ActiveModel::mutable_columns` writes; owner and creation
/// time stay as stored.
fn apply_mutable_columns(stored: &mut Task, update: Task) {
    stored.title = update.title;
    stored.description = update.description;
    stored.status = update.status;
    stored.priority = update.priority;
    stored.version = update.version;
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_owner(&self, owner_id: i32) -> DatabaseResult<Vec<Task>> {
        Ok(self.filter_owned(owner_id, |_| true).await)
    }

    async fn add(&self, mut task: Task) -> DatabaseResult<Task> {
        {
            let mut store = self.store.write().await;
            store.last_id += 1;
            task.id = store.last_id;
        }
        self.staged.lock().await.push(Staged::Insert(task.clone()));
        Ok(task)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Task>> {
        Ok(self.store.read().await.tasks.get(&id).cloned())
    }

    async fn update(&self, mut task: Task) -> DatabaseResult<Task> {
        task.version += 1;
        self.staged.lock().await.push(Staged::Update(task.clone()));
        Ok(task)
    }

    async fn remove(&self, task: Task) -> DatabaseResult<()> {
        self.staged.lock().await.push(Staged::Remove(task.id));
        Ok(())
    }

    async fn find_by_owner_and_status(
        &self,
        status: TaskStatus,
        owner_id: i32,
    ) -> DatabaseResult<Vec<Task>> {
        Ok(self.filter_owned(owner_id, |task| task.status == status).await)
    }

    async fn find_by_owner_and_priority(
        &self,
        priority: TaskPriority,
        owner_id: i32,
    ) -> DatabaseResult<Vec<Task>> {
        Ok(self
            .filter_owned(owner_id, |task| task.priority == priority)
            .await)
    }

    async fn commit(&self) -> DatabaseResult<u64> {
        let staged = std::mem::take(&mut *self.staged.lock().await);
        let mut store = self.store.write().await;

        // All or nothing: a failing change discards the whole batch.
        for change in &staged {
            check_staged(&store.tasks, change)?;
        }

        let count = staged.len() as u64;
        for change in staged {
            match change {
                Staged::Insert(task) => {
                    store.tasks.insert(task.id, task);
                }
                Staged::Update(task) => {
                    if let Some(stored) = store.tasks.get_mut(&task.id) {
                        apply_mutable_columns(stored, task);
                    }
                }
                Staged::Remove(id) => {
                    store.tasks.remove(&id);
                }
            }
        }

        tracing::debug!(changes = count, "Committed in-memory task changes");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTask;

    fn task(owner_id: i32, status: TaskStatus, priority: TaskPriority) -> Task {
        let mut task = Task::from(NewTask {
            title: format!("{status} {priority}"),
            description: "seeded".to_string(),
            priority,
            status,
        });
        task.owner_id = owner_id;
        task
    }

    #[tokio::test]
    async fn test_add_is_invisible_until_commit() {
        let repo = InMemoryTaskRepository::new();

        let staged = repo
            .add(task(1, TaskStatus::Pending, TaskPriority::Low))
            .await
            .unwrap();
        assert_eq!(staged.id, 1);
        assert!(repo.find_by_id(staged.id).await.unwrap().is_none());

        assert_eq!(repo.commit().await.unwrap(), 1);
        assert_eq!(repo.find_by_id(staged.id).await.unwrap(), Some(staged));
    }

    #[tokio::test]
    async fn test_filters_are_scoped_by_owner() {
        let repo = InMemoryTaskRepository::new();
        repo.seed([
            task(1, TaskStatus::Pending, TaskPriority::High),
            task(1, TaskStatus::Completed, TaskPriority::High),
            task(2, TaskStatus::Pending, TaskPriority::High),
        ])
        .await;

        assert_eq!(repo.find_by_owner(1).await.unwrap().len(), 2);
        assert_eq!(
            repo.find_by_owner_and_status(TaskStatus::Pending, 1)
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            repo.find_by_owner_and_priority(TaskPriority::High, 2)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(repo.find_by_owner(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_update_conflicts_and_discards_batch() {
        let repo = InMemoryTaskRepository::new();
        let seeded = repo
            .seed([task(1, TaskStatus::Pending, TaskPriority::Low)])
            .await
            .remove(0);

        let first = repo.update(seeded.clone()).await.unwrap();
        assert_eq!(first.version, 1);
        repo.commit().await.unwrap();

        // A second writer still holding version 0
        repo.update(seeded.clone()).await.unwrap();
        let err = repo.commit().await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.pending_changes().await, 0);
        assert_eq!(repo.find_by_id(seeded.id).await.unwrap().unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_remove_missing_task_fails() {
        let repo = InMemoryTaskRepository::new();
        let mut ghost = task(1, TaskStatus::Pending, TaskPriority::Low);
        ghost.id = 42;

        repo.remove(ghost).await.unwrap();
        let err = repo.commit().await.unwrap_err();
        assert!(matches!(err, DatabaseError::Generic(_)));
    }

    #[tokio::test]
    async fn test_handles_commit_only_their_own_changes() {
        let repo = InMemoryTaskRepository::new();
        let seeded = repo
            .seed([task(2, TaskStatus::Pending, TaskPriority::Low)])
            .await
            .remove(0);
        let first = repo.clone();
        let second = repo.clone();

        // The second handle stages an update and has not committed yet
        let mut renamed = seeded.clone();
        renamed.title = "Renamed".to_string();
        second.update(renamed).await.unwrap();

        first
            .add(task(1, TaskStatus::Pending, TaskPriority::High))
            .await
            .unwrap();
        assert_eq!(first.commit().await.unwrap(), 1);
        assert_eq!(second.pending_changes().await, 1);

        assert_eq!(second.commit().await.unwrap(), 1);
        let stored = repo.find_by_id(seeded.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(repo.find_by_owner(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_handle_conflicts_instead_of_losing_write() {
        let repo = InMemoryTaskRepository::new();
        let seeded = repo
            .seed([task(2, TaskStatus::Pending, TaskPriority::Low)])
            .await
            .remove(0);
        let first = repo.clone();
        let second = repo.clone();

        second.update(seeded.clone()).await.unwrap();
        first.update(seeded.clone()).await.unwrap();
        first.commit().await.unwrap();

        let err = second.commit().await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_keeps_owner_and_creation_time() {
        let repo = InMemoryTaskRepository::new();
        let seeded = repo
            .seed([task(1, TaskStatus::Pending, TaskPriority::Low)])
            .await
            .remove(0);

        let mut tampered = seeded.clone();
        tampered.owner_id = 9;
        tampered.created_at = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
        tampered.status = TaskStatus::Completed;
        repo.update(tampered).await.unwrap();
        repo.commit().await.unwrap();

        let stored = repo.find_by_id(seeded.id).await.unwrap().unwrap();
        assert_eq!(stored.owner_id, 1);
        assert_eq!(stored.created_at, seeded.created_at);
        assert_eq!(stored.status, TaskStatus::Completed);
        assert_eq!(stored.version, 1);
    }
}
