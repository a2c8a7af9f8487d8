//! Ownership rule shared by every caller that exposes tasks.
//!
//! A user may only view or modify tasks they own. "Not found" and "belongs
//! to someone else" stay distinct so the calling layer can answer 404 or 403.

use crate::error::{TaskError, TaskResult};
use crate::models::Task;

pub fn ensure_owner(task: &Task, current_user_id: i32) -> TaskResult<()> {
    if task.is_owned_by(current_user_id) {
        Ok(())
    } else {
        tracing::warn!(
            task_id = task.id,
            owner_id = task.owner_id,
            current_user_id,
            "Rejected access to foreign task"
        );
        Err(TaskError::Forbidden { task_id: task.id })
    }
}

/// Resolves the result of `TaskService::get_by_id` for the current user.
pub fn owned_task(task: Option<Task>, task_id: i32, current_user_id: i32) -> TaskResult<Task> {
    let task = task.ok_or(TaskError::NotFound(task_id))?;
    ensure_owner(&task, current_user_id)?;
    Ok(task)
}
