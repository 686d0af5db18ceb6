//! Report repository - Data access for product reports.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::product_report::{self, Entity as ReportEntity};
use crate::domain::{ProductReport, REPORT_STATUS_PENDING};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

/// Report repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ProductReport>>;

    async fn already_reported(&self, reporter_id: Uuid, product_id: i32) -> AppResult<bool>;

    async fn create(
        &self,
        reporter_id: Uuid,
        product_id: i32,
        reason: String,
        description: Option<String>,
    ) -> AppResult<ProductReport>;

    async fn list_pending(&self, params: PaginationParams) -> AppResult<Paginated<ProductReport>>;

    /// Remove a report (dismissal)
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed report repository
pub struct ReportStore {
    db: DatabaseConnection,
}

impl ReportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for ReportStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ProductReport>> {
        let result = ReportEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(ProductReport::from))
    }

    async fn already_reported(&self, reporter_id: Uuid, product_id: i32) -> AppResult<bool> {
        let count = ReportEntity::find()
            .filter(product_report::Column::ReporterId.eq(reporter_id))
            .filter(product_report::Column::ProductId.eq(product_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        reporter_id: Uuid,
        product_id: i32,
        reason: String,
        description: Option<String>,
    ) -> AppResult<ProductReport> {
        let active_model = product_report::ActiveModel {
            reporter_id: Set(reporter_id),
            product_id: Set(product_id),
            reason: Set(reason),
            description: Set(description),
            status: Set(REPORT_STATUS_PENDING.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(ProductReport::from(model))
    }

    async fn list_pending(&self, params: PaginationParams) -> AppResult<Paginated<ProductReport>> {
        let paginator = ReportEntity::find()
            .filter(product_report::Column::Status.eq(REPORT_STATUS_PENDING))
            .order_by_asc(product_report::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok(Paginated::new(
            models.into_iter().map(ProductReport::from).collect(),
            params.page,
            params.limit(),
            total,
        ))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ReportEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
