//! Favorite repository - Data access for favorited listings.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::favorite::{self, Entity as FavoriteEntity};
use crate::domain::Favorite;
use crate::errors::{AppError, AppResult};

/// Favorite repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn find(&self, user_id: Uuid, product_id: i32) -> AppResult<Option<Favorite>>;

    async fn add(&self, user_id: Uuid, product_id: i32) -> AppResult<Favorite>;

    async fn remove(&self, user_id: Uuid, product_id: i32) -> AppResult<()>;

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Favorite>>;
}

/// SeaORM-backed favorite repository
pub struct FavoriteStore {
    db: DatabaseConnection,
}

impl FavoriteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteRepository for FavoriteStore {
    async fn find(&self, user_id: Uuid, product_id: i32) -> AppResult<Option<Favorite>> {
        let result = FavoriteEntity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?;
        Ok(result.map(Favorite::from))
    }

    async fn add(&self, user_id: Uuid, product_id: i32) -> AppResult<Favorite> {
        let active_model = favorite::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(product_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(Favorite::from(model))
    }

    async fn remove(&self, user_id: Uuid, product_id: i32) -> AppResult<()> {
        let result = FavoriteEntity::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::ProductId.eq(product_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Favorite>> {
        let models = FavoriteEntity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Favorite::from).collect())
    }
}
