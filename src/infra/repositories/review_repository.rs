//! Review repository - Data access for product reviews.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::review::{self, Entity as ReviewEntity};
use crate::domain::Review;
use crate::errors::{AppError, AppResult};

/// Review repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    async fn list_for_product(&self, product_id: i32) -> AppResult<Vec<Review>>;

    async fn user_reviewed(&self, user_id: Uuid, product_id: i32) -> AppResult<bool>;

    async fn create(
        &self,
        user_id: Uuid,
        product_id: i32,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> AppResult<Review>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed review repository
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Review::from))
    }

    async fn list_for_product(&self, product_id: i32) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn user_reviewed(&self, user_id: Uuid, product_id: i32) -> AppResult<bool> {
        let count = ReviewEntity::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        user_id: Uuid,
        product_id: i32,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> AppResult<Review> {
        let active_model = review::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(product_id),
            rating: Set(rating),
            comment: Set(comment),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(Review::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
