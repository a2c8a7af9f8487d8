use chrono::Utc;
use database::{ArgumentError, positive_id, require, require_id};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskResult, storage_failure, update_failure};
use crate::models::{Task, TaskPriority, TaskStatus};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
///
/// Every argument is checked before the repository is touched; an invalid
/// call never reaches storage.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

fn validated(task: &Task) -> Result<(), ArgumentError> {
    task.validate()
        .map_err(|e| ArgumentError::malformed("task", e.to_string()))
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All tasks owned by `user_id`, possibly none
    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: Option<i32>) -> TaskResult<Vec<Task>> {
        let user_id = require_id(user_id, "user_id")?;

        self.repository
            .find_by_owner(user_id)
            .await
            .map_err(storage_failure("list_by_user", user_id))
    }

    /// Create a task owned by `user_id`
    ///
    /// The owner, creation time and version are always overwritten, whatever
    /// the caller put in them. The status is kept as supplied, so a task can
    /// start out `InProgress`; `NewTask` defaults it to `Pending`. Returns the
    /// stored task with its new id.
    #[instrument(skip(self, task))]
    pub async fn create(&self, task: Option<Task>, user_id: Option<i32>) -> TaskResult<Task> {
        let mut task = require(task, "task")?;
        let user_id = require_id(user_id, "user_id")?;
        validated(&task)?;

        task.id = 0;
        task.owner_id = user_id;
        task.created_at = Utc::now();
        task.version = 0;

        let stored = self
            .repository
            .add(task)
            .await
            .map_err(storage_failure("create", user_id))?;
        self.repository
            .commit()
            .await
            .map_err(storage_failure("create", user_id))?;

        tracing::info!(task_id = stored.id, owner_id = user_id, "Created task");
        Ok(stored)
    }

    /// Look a task up by id; an unknown id is `Ok(None)`
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Option<i32>) -> TaskResult<Option<Task>> {
        let id = require_id(id, "id")?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(storage_failure("get_by_id", id))
    }

    /// Persist the mutable fields of `task`, returning it with its new version
    #[instrument(skip(self, task), fields(task_id = tracing::field::Empty))]
    pub async fn update(&self, task: Option<Task>) -> TaskResult<Task> {
        let task = require(task, "task")?;
        let id = positive_id(task.id, "task")?;
        tracing::Span::current().record("task_id", id);
        validated(&task)?;

        let updated = self
            .repository
            .update(task)
            .await
            .map_err(update_failure("update", id))?;
        self.repository
            .commit()
            .await
            .map_err(update_failure("update", id))?;

        tracing::info!(task_id = id, version = updated.version, "Updated task");
        Ok(updated)
    }

    #[instrument(skip(self, task), fields(task_id = tracing::field::Empty))]
    pub async fn delete(&self, task: Option<Task>) -> TaskResult<()> {
        let task = require(task, "task")?;
        let id = positive_id(task.id, "task")?;
        tracing::Span::current().record("task_id", id);

        self.repository
            .remove(task)
            .await
            .map_err(storage_failure("delete", id))?;
        self.repository
            .commit()
            .await
            .map_err(storage_failure("delete", id))?;

        tracing::info!(task_id = id, "Deleted task");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn find_by_status(
        &self,
        status: Option<TaskStatus>,
        user_id: Option<i32>,
    ) -> TaskResult<Vec<Task>> {
        let status = require(status, "status")?;
        let user_id = require_id(user_id, "user_id")?;

        self.repository
            .find_by_owner_and_status(status, user_id)
            .await
            .map_err(storage_failure("find_by_status", user_id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_priority(
        &self,
        priority: Option<TaskPriority>,
        user_id: Option<i32>,
    ) -> TaskResult<Vec<Task>> {
        let priority = require(priority, "priority")?;
        let user_id = require_id(user_id, "user_id")?;

        self.repository
            .find_by_owner_and_priority(priority, user_id)
            .await
            .map_err(storage_failure("find_by_priority", user_id))
    }
}
