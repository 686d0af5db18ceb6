//! Trade repository - Read and status access for barter offers.
//!
//! Offer creation and acceptance are transactional and live in the
//! unit of work.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{
    trade_item::{self, Entity as TradeItemEntity},
    trade_offer::{self, Entity as TradeOfferEntity},
};
use crate::domain::{TradeItem, TradeOffer, TradeOfferStatus};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

/// Trade repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TradeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<TradeOffer>>;

    async fn items(&self, trade_id: i32) -> AppResult<Vec<TradeItem>>;

    /// Offers where the user is either offerer or receiver
    async fn list_for_user(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<TradeOffer>>;

    async fn set_status(&self, id: i32, status: TradeOfferStatus) -> AppResult<TradeOffer>;
}

/// SeaORM-backed trade repository
pub struct TradeStore {
    db: DatabaseConnection,
}

impl TradeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TradeRepository for TradeStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<TradeOffer>> {
        let result = TradeOfferEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(TradeOffer::from))
    }

    async fn items(&self, trade_id: i32) -> AppResult<Vec<TradeItem>> {
        let models = TradeItemEntity::find()
            .filter(trade_item::Column::TradeId.eq(trade_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(TradeItem::from).collect())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<TradeOffer>> {
        let paginator = TradeOfferEntity::find()
            .filter(
                Condition::any()
                    .add(trade_offer::Column::OffererId.eq(user_id))
                    .add(trade_offer::Column::ReceiverId.eq(user_id)),
            )
            .order_by_desc(trade_offer::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok(Paginated::new(
            models.into_iter().map(TradeOffer::from).collect(),
            params.page,
            params.limit(),
            total,
        ))
    }

    async fn set_status(&self, id: i32, status: TradeOfferStatus) -> AppResult<TradeOffer> {
        let model = TradeOfferEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: trade_offer::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));

        let model = active.update(&self.db).await?;
        Ok(TradeOffer::from(model))
    }
}
