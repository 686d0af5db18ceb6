//! Product service - Listing lifecycle and public catalog queries.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateProduct, ProductResponse, ProductStatus, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ProductFilter, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Published listings for the public catalog, optionally by category
    async fn list_published(
        &self,
        category_id: Option<i32>,
        params: PaginationParams,
    ) -> AppResult<Paginated<ProductResponse>>;

    /// A single listing with its images; any status is visible here
    async fn get_product(&self, id: i32) -> AppResult<ProductResponse>;

    /// The seller's own listings, any status
    async fn my_listings(
        &self,
        seller_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<ProductResponse>>;

    /// Create a listing; requires the seller role
    async fn create_listing(
        &self,
        seller_id: Uuid,
        role: UserRole,
        create: CreateProduct,
    ) -> AppResult<ProductResponse>;

    /// Delete a listing; the owner or an admin only
    async fn delete_listing(&self, id: i32, actor_id: Uuid, role: UserRole) -> AppResult<()>;
}

/// Concrete implementation of ProductService using Unit of Work.
pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Attach images to a page of products in one query
    async fn with_images(
        &self,
        page: Paginated<crate::domain::Product>,
    ) -> AppResult<Paginated<ProductResponse>> {
        let ids: Vec<i32> = page.data.iter().map(|p| p.id).collect();
        let images = self.uow.products().images_for_many(ids).await?;

        let mut by_product: HashMap<i32, Vec<crate::domain::ProductImage>> = HashMap::new();
        for image in images {
            by_product.entry(image.product_id).or_default().push(image);
        }

        Ok(page.map(|product| {
            let images = by_product.remove(&product.id).unwrap_or_default();
            ProductResponse::from_product(product, images)
        }))
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn list_published(
        &self,
        category_id: Option<i32>,
        params: PaginationParams,
    ) -> AppResult<Paginated<ProductResponse>> {
        let filter = ProductFilter {
            category_id,
            status: Some(ProductStatus::Published),
            ..Default::default()
        };
        let page = self.uow.products().list(filter, params).await?;
        self.with_images(page).await
    }

    async fn get_product(&self, id: i32) -> AppResult<ProductResponse> {
        let product = self
            .uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        let images = self.uow.products().images_for(id).await?;
        Ok(ProductResponse::from_product(product, images))
    }

    async fn my_listings(
        &self,
        seller_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<ProductResponse>> {
        let filter = ProductFilter {
            seller_id: Some(seller_id),
            ..Default::default()
        };
        let page = self.uow.products().list(filter, params).await?;
        self.with_images(page).await
    }

    async fn create_listing(
        &self,
        seller_id: Uuid,
        role: UserRole,
        create: CreateProduct,
    ) -> AppResult<ProductResponse> {
        if !role.is_seller() {
            return Err(AppError::Forbidden);
        }

        if create.price <= Decimal::ZERO {
            return Err(AppError::validation("Price must be positive"));
        }

        if self
            .uow
            .categories()
            .find_by_id(create.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation("Category does not exist"));
        }

        let product = self.uow.products().create(seller_id, create).await?;
        let images = self.uow.products().images_for(product.id).await?;
        Ok(ProductResponse::from_product(product, images))
    }

    async fn delete_listing(&self, id: i32, actor_id: Uuid, role: UserRole) -> AppResult<()> {
        let product = self
            .uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        if !product.is_owned_by(actor_id) && !role.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.uow.products().delete(id).await
    }
}
