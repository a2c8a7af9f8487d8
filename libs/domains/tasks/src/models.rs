use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: u64 = 100;
/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_LEN: u64 = 500;

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// Task status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// A unit of work owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Task {
    /// Store-assigned identifier (0 until persisted)
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = TITLE_MAX_LEN))]
    pub title: String,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub description: String,
    /// Stamped by the service on creation, never modified afterwards
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Owning user, taken from the authenticated caller on creation
    #[serde(default)]
    pub owner_id: i32,
    /// Optimistic concurrency token, bumped by every persisted update
    #[serde(default)]
    pub version: i32,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
}

/// DTO carrying the mutable fields of a task
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl From<NewTask> for Task {
    fn from(input: NewTask) -> Self {
        Self {
            id: 0,
            title: input.title,
            description: input.description,
            created_at: Utc::now(),
            status: input.status,
            priority: input.priority,
            owner_id: 0,
            version: 0,
        }
    }
}

impl Task {
    /// Copy the mutable fields of `update` onto this task.
    ///
    /// `id`, `owner_id`, `created_at` and `version` are left untouched.
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }
}
