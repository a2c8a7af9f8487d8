use crate::models::{Task, TaskPriority, TaskStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub owner_id: i32,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            created_at: model.created_at.into(),
            status: model.status,
            priority: model.priority,
            owner_id: model.owner_id,
            version: model.version,
        }
    }
}

/// Insert form: the id is left to the store.
impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(task.title),
            description: Set(task.description),
            created_at: Set(task.created_at.into()),
            status: Set(task.status),
            priority: Set(task.priority),
            owner_id: Set(task.owner_id),
            version: Set(task.version),
        }
    }
}

impl ActiveModel {
    /// Only the mutable columns plus the next version; used with
    /// `update_many().set(..)` so identity columns are never rewritten.
    pub fn mutable_columns(task: &Task, next_version: i32) -> Self {
        ActiveModel {
            id: NotSet,
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            created_at: NotSet,
            status: Set(task.status),
            priority: Set(task.priority),
            owner_id: NotSet,
            version: Set(next_version),
        }
    }
}
