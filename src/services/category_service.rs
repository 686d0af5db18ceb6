//! Category service - Public category tree and admin category management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Category, CategoryTree, Color, UpsertCategory};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Root categories with their direct children
    async fn tree(&self) -> AppResult<Vec<CategoryTree>>;

    /// Flat list of all categories (admin view)
    async fn list_all(&self) -> AppResult<Vec<Category>>;

    async fn create(&self, upsert: UpsertCategory) -> AppResult<Category>;

    async fn update(&self, id: i32, upsert: UpsertCategory) -> AppResult<Category>;

    /// Delete a category; refused while children or products reference it
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Color lookup values for listing forms
    async fn list_colors(&self) -> AppResult<Vec<Color>>;
}

/// Concrete implementation of CategoryService using Unit of Work.
pub struct CategoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CategoryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_valid_parent(&self, id: Option<i32>, parent_id: Option<i32>) -> AppResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };

        if id == Some(parent_id) {
            return Err(AppError::validation("Category cannot be its own parent"));
        }

        if self.uow.categories().find_by_id(parent_id).await?.is_none() {
            return Err(AppError::validation("Parent category does not exist"));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for CategoryManager<U> {
    async fn tree(&self) -> AppResult<Vec<CategoryTree>> {
        let all = self.uow.categories().list_all().await?;

        let (roots, children): (Vec<_>, Vec<_>) =
            all.into_iter().partition(|c| c.parent_id.is_none());

        Ok(roots
            .into_iter()
            .map(|root| {
                let direct = children
                    .iter()
                    .filter(|c| c.parent_id == Some(root.id))
                    .cloned()
                    .collect();
                CategoryTree::new(root, direct)
            })
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Category>> {
        self.uow.categories().list_all().await
    }

    async fn create(&self, upsert: UpsertCategory) -> AppResult<Category> {
        self.ensure_valid_parent(None, upsert.parent_id).await?;
        self.uow.categories().create(upsert).await
    }

    async fn update(&self, id: i32, upsert: UpsertCategory) -> AppResult<Category> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        self.ensure_valid_parent(Some(id), upsert.parent_id).await?;
        self.uow.categories().update(id, upsert).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if self.uow.categories().has_children(id).await? {
            return Err(AppError::conflict("Category still has subcategories"));
        }
        if self.uow.categories().has_products(id).await? {
            return Err(AppError::conflict("Category still has products"));
        }

        self.uow.categories().delete(id).await
    }

    async fn list_colors(&self) -> AppResult<Vec<Color>> {
        self.uow.categories().list_colors().await
    }
}
