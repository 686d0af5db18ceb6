//! Admin service - User administration and listing moderation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::is_valid_role;
use crate::domain::{ProductReport, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Admin service trait for dependency injection.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>>;

    /// Change a user's role
    async fn set_role(&self, user_id: Uuid, role: String) -> AppResult<User>;

    /// Delete a user account together with everything they own
    async fn purge_user(&self, admin_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Reports awaiting moderation
    async fn list_reports(&self, params: PaginationParams) -> AppResult<Paginated<ProductReport>>;

    /// Drop a report without acting on the listing
    async fn dismiss_report(&self, report_id: i32) -> AppResult<()>;

    /// Remove the reported listing and the report that flagged it
    async fn ban_product(&self, report_id: i32) -> AppResult<()>;
}

/// Concrete implementation of AdminService using Unit of Work.
pub struct AdminManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminManager<U> {
    async fn list_users(&self, params: PaginationParams) -> AppResult<Paginated<User>> {
        self.uow.users().list(params).await
    }

    async fn set_role(&self, user_id: Uuid, role: String) -> AppResult<User> {
        if !is_valid_role(&role) {
            return Err(AppError::validation("Unknown role"));
        }
        self.uow.users().update_role(user_id, role).await
    }

    async fn purge_user(&self, admin_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if admin_id == user_id {
            return Err(AppError::bad_request("You cannot delete your own account"));
        }

        self.uow
            .transaction(move |ctx| Box::pin(async move { ctx.admin().purge_user(user_id).await }))
            .await
    }

    async fn list_reports(&self, params: PaginationParams) -> AppResult<Paginated<ProductReport>> {
        self.uow.reports().list_pending(params).await
    }

    async fn dismiss_report(&self, report_id: i32) -> AppResult<()> {
        self.uow.reports().delete(report_id).await
    }

    async fn ban_product(&self, report_id: i32) -> AppResult<()> {
        let report = self
            .uow
            .reports()
            .find_by_id(report_id)
            .await?
            .ok_or_not_found()?;

        let product_id = report.product_id;
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.admin().ban_product(product_id, report_id).await })
            })
            .await
    }
}
