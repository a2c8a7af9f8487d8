use async_trait::async_trait;
use database::postgres::UnitOfWork;
use database::{DatabaseError, DatabaseResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{entity, models::User, repository::UserRepository};

/// PostgreSQL user repository; one per request, like the task repository.
pub struct PgUserRepository {
    unit: UnitOfWork,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            unit: UnitOfWork::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn add(&self, user: User) -> DatabaseResult<User> {
        let active_model: entity::ActiveModel = user.into();

        let model = self
            .unit
            .stage::<_, entity::Model>(move |txn| {
                Box::pin(async move { active_model.insert(txn).await })
            })
            .await?;

        tracing::debug!(user_id = model.id, "Staged user insert");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(self.unit.connection())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(self.unit.connection())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn commit(&self) -> DatabaseResult<u64> {
        self.unit.commit().await.map_err(DatabaseError::from)
    }
}
