use chrono::Utc;
use sea_orm::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, PaginatorTrait, QueryFilter};

use crate::entities::v1::users::{ActiveModel, Column, Entity, Model};

impl Model {
    /// Build a not-yet-persisted user. `email` must already be normalized.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password: password_hash.into(),
            created_at: Utc::now().naive_utc(),
        }
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await.inspect_err(|e| {
            ::tracing::error!(error = %e, user_id = %id, "Failed to find user by id");
        })
    }

    pub async fn find_by_email<T: AsRef<str>>(
        db: &DatabaseConnection,
        email: T,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.as_ref()))
            .one(db)
            .await
            .inspect_err(|e| {
                ::tracing::error!(error = %e, "Failed to find user by email");
            })
    }

    pub async fn email_exists<T: AsRef<str>>(db: &DatabaseConnection, email: T) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Email.eq(email.as_ref()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }
}
