//! Profile service - The user's addresses and saved payment cards.
//!
//! Every operation is scoped to the acting user; card numbers only ever
//! leave this layer masked.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Address, CardResponse, UpsertAddress, UpsertCard};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn list_addresses(&self, user_id: Uuid) -> AppResult<Vec<Address>>;

    async fn create_address(&self, user_id: Uuid, upsert: UpsertAddress) -> AppResult<Address>;

    async fn update_address(
        &self,
        user_id: Uuid,
        address_id: i32,
        upsert: UpsertAddress,
    ) -> AppResult<Address>;

    async fn delete_address(&self, user_id: Uuid, address_id: i32) -> AppResult<()>;

    /// Saved cards with their numbers masked
    async fn list_cards(&self, user_id: Uuid) -> AppResult<Vec<CardResponse>>;

    async fn create_card(&self, user_id: Uuid, upsert: UpsertCard) -> AppResult<CardResponse>;

    async fn delete_card(&self, user_id: Uuid, card_id: i32) -> AppResult<()>;

    async fn set_default_card(&self, user_id: Uuid, card_id: i32) -> AppResult<()>;
}

/// Concrete implementation of ProfileService using Unit of Work.
pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn owned_address(&self, user_id: Uuid, address_id: i32) -> AppResult<Address> {
        let address = self
            .uow
            .addresses()
            .find_by_id(address_id)
            .await?
            .ok_or_not_found()?;
        if address.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        Ok(address)
    }

    async fn ensure_owned_card(&self, user_id: Uuid, card_id: i32) -> AppResult<()> {
        let card = self
            .uow
            .cards()
            .find_by_id(card_id)
            .await?
            .ok_or_not_found()?;
        if card.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for ProfileManager<U> {
    async fn list_addresses(&self, user_id: Uuid) -> AppResult<Vec<Address>> {
        self.uow.addresses().list_for_user(user_id).await
    }

    async fn create_address(&self, user_id: Uuid, upsert: UpsertAddress) -> AppResult<Address> {
        self.uow.addresses().create(user_id, upsert).await
    }

    async fn update_address(
        &self,
        user_id: Uuid,
        address_id: i32,
        upsert: UpsertAddress,
    ) -> AppResult<Address> {
        self.owned_address(user_id, address_id).await?;
        self.uow.addresses().update(address_id, upsert).await
    }

    async fn delete_address(&self, user_id: Uuid, address_id: i32) -> AppResult<()> {
        self.owned_address(user_id, address_id).await?;
        self.uow.addresses().delete(address_id).await
    }

    async fn list_cards(&self, user_id: Uuid) -> AppResult<Vec<CardResponse>> {
        let cards = self.uow.cards().list_for_user(user_id).await?;
        Ok(cards.into_iter().map(CardResponse::from).collect())
    }

    async fn create_card(&self, user_id: Uuid, upsert: UpsertCard) -> AppResult<CardResponse> {
        let card = self.uow.cards().create(user_id, upsert).await?;
        Ok(CardResponse::from(card))
    }

    async fn delete_card(&self, user_id: Uuid, card_id: i32) -> AppResult<()> {
        self.ensure_owned_card(user_id, card_id).await?;
        self.uow.cards().delete(card_id).await
    }

    async fn set_default_card(&self, user_id: Uuid, card_id: i32) -> AppResult<()> {
        self.ensure_owned_card(user_id, card_id).await?;
        self.uow.cards().set_default(user_id, card_id).await
    }
}
