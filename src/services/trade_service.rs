//! Trade service - Barter offers between users.
//!
//! Offers exchange the offerer's listings and/or cash for one of the
//! receiver's listings. Accepting an offer settles it and marks every
//! involved product sold in one transaction.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    CreateTradeOffer, TradeDecision, TradeItem, TradeItemType, TradeOffer, TradeOfferStatus,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Trade offer with its attached products
#[derive(Debug, Serialize, ToSchema)]
pub struct TradeDetail {
    #[schema(value_type = Object)]
    pub offer: TradeOffer,
    pub items: Vec<TradeItem>,
}

/// Trade service trait for dependency injection.
#[async_trait]
pub trait TradeService: Send + Sync {
    /// Make an offer on another user's listing
    async fn create_offer(
        &self,
        offerer_id: Uuid,
        create: CreateTradeOffer,
    ) -> AppResult<TradeDetail>;

    /// One offer with its items; parties only
    async fn get_offer(&self, id: i32, actor_id: Uuid) -> AppResult<TradeDetail>;

    /// Offers the user made or received
    async fn list_for_user(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<TradeOffer>>;

    /// Accept, reject, or cancel a pending offer
    async fn decide(
        &self,
        id: i32,
        actor_id: Uuid,
        decision: TradeDecision,
    ) -> AppResult<TradeOffer>;
}

/// Concrete implementation of TradeService using Unit of Work.
pub struct TradeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TradeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TradeService for TradeManager<U> {
    async fn create_offer(
        &self,
        offerer_id: Uuid,
        create: CreateTradeOffer,
    ) -> AppResult<TradeDetail> {
        if !create.has_consideration() {
            return Err(AppError::validation(
                "Offer at least one product or a cash amount",
            ));
        }

        let target = self
            .uow
            .products()
            .find_by_id(create.target_product_id)
            .await?
            .ok_or_not_found()?;

        if !target.is_available() {
            return Err(AppError::conflict("Product is no longer available"));
        }
        if target.is_owned_by(offerer_id) {
            return Err(AppError::bad_request("You cannot trade for your own listing"));
        }

        // Every offered product must be the offerer's own live listing.
        let offered = self
            .uow
            .products()
            .find_many(create.offered_product_ids.clone())
            .await?;
        if offered.len() != create.offered_product_ids.len() {
            return Err(AppError::validation("Offered product does not exist"));
        }
        for product in &offered {
            if !product.is_owned_by(offerer_id) {
                return Err(AppError::Forbidden);
            }
            if !product.is_available() {
                return Err(AppError::conflict("Product is no longer available"));
            }
        }

        let receiver_id = target.seller_id;
        let target_id = create.target_product_id;
        let offered_ids = create.offered_product_ids;
        let message = create.message;
        let cash = create.offered_cash;
        let trade_code = TradeOffer::new_trade_code();

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.trades();

                    let offer = repo
                        .create_offer(trade_code, offerer_id, receiver_id, target_id, message, cash)
                        .await?;

                    let mut items = Vec::with_capacity(offered_ids.len() + 1);
                    items.push(
                        repo.add_item(offer.id, target_id, TradeItemType::Requested)
                            .await?,
                    );
                    for product_id in offered_ids {
                        items.push(
                            repo.add_item(offer.id, product_id, TradeItemType::Offered)
                                .await?,
                        );
                    }

                    Ok(TradeDetail { offer, items })
                })
            })
            .await
    }

    async fn get_offer(&self, id: i32, actor_id: Uuid) -> AppResult<TradeDetail> {
        let offer = self.uow.trades().find_by_id(id).await?.ok_or_not_found()?;
        if !offer.is_party(actor_id) {
            return Err(AppError::Forbidden);
        }
        let items = self.uow.trades().items(id).await?;
        Ok(TradeDetail { offer, items })
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<TradeOffer>> {
        self.uow.trades().list_for_user(user_id, params).await
    }

    async fn decide(
        &self,
        id: i32,
        actor_id: Uuid,
        decision: TradeDecision,
    ) -> AppResult<TradeOffer> {
        let offer = self.uow.trades().find_by_id(id).await?.ok_or_not_found()?;
        let next = offer.decide(decision, actor_id)?;

        if next != TradeOfferStatus::Accepted {
            return self.uow.trades().set_status(id, next).await;
        }

        // Acceptance settles the trade: every product on either side of
        // the offer leaves the catalog.
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.trades();
                    let offer = repo.set_status(id, TradeOfferStatus::Accepted).await?;
                    let product_ids = repo.item_product_ids(id).await?;
                    repo.mark_products_sold(product_ids).await?;
                    Ok(offer)
                })
            })
            .await
    }
}
