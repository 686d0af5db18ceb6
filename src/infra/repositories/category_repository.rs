//! Category repository - Data access for the category tree and color lookup.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::{
    category::{self, Entity as CategoryEntity},
    color::{self, Entity as ColorEntity},
    product::{self, Entity as ProductEntity},
};
use crate::domain::{Category, Color, UpsertCategory};
use crate::errors::{AppError, AppResult};

/// Category repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    async fn list_all(&self) -> AppResult<Vec<Category>>;

    async fn create(&self, upsert: UpsertCategory) -> AppResult<Category>;

    async fn update(&self, id: i32, upsert: UpsertCategory) -> AppResult<Category>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn has_children(&self, id: i32) -> AppResult<bool>;

    async fn has_products(&self, id: i32) -> AppResult<bool>;

    async fn list_colors(&self) -> AppResult<Vec<Color>>;
}

/// SeaORM-backed category repository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Category::from))
    }

    async fn list_all(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn create(&self, upsert: UpsertCategory) -> AppResult<Category> {
        let active_model = category::ActiveModel {
            name: Set(upsert.name),
            parent_id: Set(upsert.parent_id),
            image_url: Set(upsert.image_url),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(Category::from(model))
    }

    async fn update(&self, id: i32, upsert: UpsertCategory) -> AppResult<Category> {
        let model = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: category::ActiveModel = model.into();
        active.name = Set(upsert.name);
        active.parent_id = Set(upsert.parent_id);
        active.image_url = Set(upsert.image_url);

        let model = active.update(&self.db).await?;
        Ok(Category::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = CategoryEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn has_children(&self, id: i32) -> AppResult<bool> {
        let count = CategoryEntity::find()
            .filter(category::Column::ParentId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn has_products(&self, id: i32) -> AppResult<bool> {
        let count = ProductEntity::find()
            .filter(product::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn list_colors(&self) -> AppResult<Vec<Color>> {
        let models = ColorEntity::find()
            .order_by_asc(color::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Color::from).collect())
    }
}
