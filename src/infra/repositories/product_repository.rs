//! Product repository - Data access for listings and their images.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{
    product::{self, Entity as ProductEntity},
    product_image::{self, Entity as ProductImageEntity},
};
use crate::domain::{CreateProduct, Product, ProductImage, ProductStatus};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

/// Filters for the public product listing
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<i32>,
    pub seller_id: Option<Uuid>,
    /// When set, only products in this status are returned
    pub status: Option<ProductStatus>,
}

/// Product repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;

    async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<Product>>;

    async fn list(&self, filter: ProductFilter, params: PaginationParams)
        -> AppResult<Paginated<Product>>;

    async fn create(&self, seller_id: Uuid, create: CreateProduct) -> AppResult<Product>;

    async fn set_status(&self, id: i32, status: ProductStatus) -> AppResult<Product>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn images_for(&self, product_id: i32) -> AppResult<Vec<ProductImage>>;

    async fn images_for_many(&self, product_ids: Vec<i32>) -> AppResult<Vec<ProductImage>>;
}

/// SeaORM-backed product repository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Product::from))
    }

    async fn find_many(&self, ids: Vec<i32>) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ProductEntity::find()
            .filter(product::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn list(
        &self,
        filter: ProductFilter,
        params: PaginationParams,
    ) -> AppResult<Paginated<Product>> {
        let mut query = ProductEntity::find().order_by_desc(product::Column::CreatedAt);

        if let Some(category_id) = filter.category_id {
            query = query.filter(product::Column::CategoryId.eq(category_id));
        }
        if let Some(seller_id) = filter.seller_id {
            query = query.filter(product::Column::SellerId.eq(seller_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(product::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok(Paginated::new(
            models.into_iter().map(Product::from).collect(),
            params.page,
            params.limit(),
            total,
        ))
    }

    async fn create(&self, seller_id: Uuid, create: CreateProduct) -> AppResult<Product> {
        let active_model = product::ActiveModel {
            seller_id: Set(seller_id),
            category_id: Set(create.category_id),
            color_id: Set(create.color_id),
            title: Set(create.title),
            description: Set(create.description),
            price: Set(create.price),
            original_price: Set(create.original_price),
            stock_qty: Set(create.stock_qty.unwrap_or(1)),
            gender: Set(create.gender.map(|g| g.as_str().to_string())),
            status: Set(ProductStatus::Published.as_str().to_string()),
            is_free_shipping: Set(create.is_free_shipping.unwrap_or(false)),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;

        // First image becomes the main one
        for (i, url) in create.image_urls.into_iter().enumerate() {
            let image = product_image::ActiveModel {
                product_id: Set(model.id),
                image_url: Set(url),
                is_main: Set(i == 0),
                ..Default::default()
            };
            image.insert(&self.db).await?;
        }

        Ok(Product::from(model))
    }

    async fn set_status(&self, id: i32, status: ProductStatus) -> AppResult<Product> {
        let model = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: product::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));

        let model = active.update(&self.db).await?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn images_for(&self, product_id: i32) -> AppResult<Vec<ProductImage>> {
        let models = ProductImageEntity::find()
            .filter(product_image::Column::ProductId.eq(product_id))
            .order_by_desc(product_image::Column::IsMain)
            .order_by_asc(product_image::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(ProductImage::from).collect())
    }

    async fn images_for_many(&self, product_ids: Vec<i32>) -> AppResult<Vec<ProductImage>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ProductImageEntity::find()
            .filter(product_image::Column::ProductId.is_in(product_ids))
            .order_by_desc(product_image::Column::IsMain)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(ProductImage::from).collect())
    }
}
