//! Favorite service - Wishlist toggling and listing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ProductResponse;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Favorite service trait for dependency injection.
#[async_trait]
pub trait FavoriteService: Send + Sync {
    /// Toggle the favorite mark; returns true when the product is now favorited
    async fn toggle(&self, user_id: Uuid, product_id: i32) -> AppResult<bool>;

    /// The user's favorited listings
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<ProductResponse>>;
}

/// Concrete implementation of FavoriteService using Unit of Work.
pub struct FavoriteManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FavoriteManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FavoriteService for FavoriteManager<U> {
    async fn toggle(&self, user_id: Uuid, product_id: i32) -> AppResult<bool> {
        self.uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        match self.uow.favorites().find(user_id, product_id).await? {
            Some(_) => {
                self.uow.favorites().remove(user_id, product_id).await?;
                Ok(false)
            }
            None => {
                self.uow.favorites().add(user_id, product_id).await?;
                Ok(true)
            }
        }
    }

    async fn list(&self, user_id: Uuid) -> AppResult<Vec<ProductResponse>> {
        let favorites = self.uow.favorites().list_for_user(user_id).await?;
        let ids: Vec<i32> = favorites.iter().map(|f| f.product_id).collect();

        let products = self.uow.products().find_many(ids.clone()).await?;
        let images = self.uow.products().images_for_many(ids).await?;

        let mut by_product: HashMap<i32, Vec<crate::domain::ProductImage>> = HashMap::new();
        for image in images {
            by_product.entry(image.product_id).or_default().push(image);
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let images = by_product.remove(&product.id).unwrap_or_default();
                ProductResponse::from_product(product, images)
            })
            .collect())
    }
}
