//! Report service - Flagging listings for moderation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ProductReport;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// File a report against a listing; once per user per listing
    async fn file(
        &self,
        reporter_id: Uuid,
        product_id: i32,
        reason: String,
        description: Option<String>,
    ) -> AppResult<ProductReport>;
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn file(
        &self,
        reporter_id: Uuid,
        product_id: i32,
        reason: String,
        description: Option<String>,
    ) -> AppResult<ProductReport> {
        if reason.trim().is_empty() {
            return Err(AppError::validation("A reason is required"));
        }

        let product = self
            .uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        if product.is_owned_by(reporter_id) {
            return Err(AppError::bad_request("You cannot report your own listing"));
        }

        if self
            .uow
            .reports()
            .already_reported(reporter_id, product_id)
            .await?
        {
            return Err(AppError::conflict("You have already reported this product"));
        }

        self.uow
            .reports()
            .create(reporter_id, product_id, reason, description)
            .await
    }
}
