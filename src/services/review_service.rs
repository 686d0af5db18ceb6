//! Review service - Product ratings and comments.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use crate::domain::{Review, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Reviews on a listing, newest first
    async fn list_for_product(&self, product_id: i32) -> AppResult<Vec<Review>>;

    /// Leave a review; one per user per listing, never on your own
    async fn add(
        &self,
        user_id: Uuid,
        product_id: i32,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review>;

    /// Delete a review; the author or an admin only
    async fn delete(&self, id: i32, actor_id: Uuid, role: UserRole) -> AppResult<()>;
}

/// Concrete implementation of ReviewService using Unit of Work.
pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn list_for_product(&self, product_id: i32) -> AppResult<Vec<Review>> {
        self.uow.reviews().list_for_product(product_id).await
    }

    async fn add(
        &self,
        user_id: Uuid,
        product_id: i32,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review> {
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let product = self
            .uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        if product.is_owned_by(user_id) {
            return Err(AppError::bad_request("You cannot review your own listing"));
        }

        if self.uow.reviews().user_reviewed(user_id, product_id).await? {
            return Err(AppError::conflict("You have already reviewed this product"));
        }

        self.uow
            .reviews()
            .create(user_id, product_id, Some(rating), comment)
            .await
    }

    async fn delete(&self, id: i32, actor_id: Uuid, role: UserRole) -> AppResult<()> {
        let review = self.uow.reviews().find_by_id(id).await?.ok_or_not_found()?;

        if review.user_id != actor_id && !role.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.uow.reviews().delete(id).await
    }
}
