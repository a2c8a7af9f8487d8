use async_trait::async_trait;
use database::postgres::UnitOfWork;
use database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    models::{Task, TaskPriority, TaskStatus},
    repository::TaskRepository,
};

/// PostgreSQL task repository.
///
/// Writes are staged in the repository's [`UnitOfWork`]; build one repository
/// per request so staged changes never leak between callers.
pub struct PgTaskRepository {
    unit: UnitOfWork,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            unit: UnitOfWork::new(db),
        }
    }

    async fn find_owned(&self, owner_id: i32, condition: Condition) -> DatabaseResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::OwnerId.eq(owner_id))
            .filter(condition)
            .order_by_asc(entity::Column::Id)
            .all(self.unit.connection())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_owner(&self, owner_id: i32) -> DatabaseResult<Vec<Task>> {
        self.find_owned(owner_id, Condition::all()).await
    }

    async fn add(&self, task: Task) -> DatabaseResult<Task> {
        let active_model: entity::ActiveModel = task.into();

        let model = self
            .unit
            .stage::<_, entity::Model>(move |txn| {
                Box::pin(async move { active_model.insert(txn).await })
            })
            .await?;

        tracing::debug!(task_id = model.id, "Staged task insert");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id)
            .one(self.unit.connection())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, mut task: Task) -> DatabaseResult<Task> {
        let (id, expected) = (task.id, task.version);
        let next = expected + 1;
        let changes = entity::ActiveModel::mutable_columns(&task, next);

        self.unit
            .stage::<_, ()>(move |txn| {
                Box::pin(async move {
                    let result = entity::Entity::update_many()
                        .set(changes)
                        .filter(entity::Column::Id.eq(id))
                        .filter(entity::Column::Version.eq(expected))
                        .exec(txn)
                        .await?;

                    // Either the row is gone or someone else bumped the version
                    if result.rows_affected == 0 {
                        return Err(DbErr::RecordNotUpdated);
                    }
                    Ok(())
                })
            })
            .await?;

        tracing::debug!(task_id = id, version = next, "Staged task update");
        task.version = next;
        Ok(task)
    }

    async fn remove(&self, task: Task) -> DatabaseResult<()> {
        let id = task.id;

        self.unit
            .stage::<_, ()>(move |txn| {
                Box::pin(async move {
                    let result = entity::Entity::delete_by_id(id).exec(txn).await?;
                    if result.rows_affected == 0 {
                        return Err(DbErr::RecordNotFound(format!("task {}", id)));
                    }
                    Ok(())
                })
            })
            .await?;

        tracing::debug!(task_id = id, "Staged task removal");
        Ok(())
    }

    async fn find_by_owner_and_status(
        &self,
        status: TaskStatus,
        owner_id: i32,
    ) -> DatabaseResult<Vec<Task>> {
        self.find_owned(owner_id, Condition::all().add(entity::Column::Status.eq(status)))
            .await
    }

    async fn find_by_owner_and_priority(
        &self,
        priority: TaskPriority,
        owner_id: i32,
    ) -> DatabaseResult<Vec<Task>> {
        self.find_owned(owner_id, Condition::all().add(entity::Column::Priority.eq(priority)))
            .await
    }

    async fn commit(&self) -> DatabaseResult<u64> {
        self.unit.commit().await.map_err(DatabaseError::from)
    }
}
