//! Conversation service - Buyer/seller messaging about listings.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Conversation, Message};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Conversation service trait for dependency injection.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Start (or reuse) a thread about a listing and send the first message
    async fn start(
        &self,
        buyer_id: Uuid,
        product_id: i32,
        content: String,
    ) -> AppResult<Conversation>;

    /// Threads the user takes part in, most recently active first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Conversation>>;

    /// Messages in a thread; the other side's messages are marked read
    async fn messages(&self, conversation_id: i32, reader_id: Uuid) -> AppResult<Vec<Message>>;

    /// Send a message into an existing thread
    async fn send(
        &self,
        conversation_id: i32,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message>;
}

/// Concrete implementation of ConversationService using Unit of Work.
pub struct ConversationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ConversationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn participant_thread(&self, id: i32, user_id: Uuid) -> AppResult<Conversation> {
        let thread = self
            .uow
            .conversations()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        if !thread.is_participant(user_id) {
            return Err(AppError::Forbidden);
        }
        Ok(thread)
    }
}

#[async_trait]
impl<U: UnitOfWork> ConversationService for ConversationManager<U> {
    async fn start(
        &self,
        buyer_id: Uuid,
        product_id: i32,
        content: String,
    ) -> AppResult<Conversation> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Message cannot be empty"));
        }

        let product = self
            .uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        let seller_id = product.seller_id;
        if seller_id == buyer_id {
            return Err(AppError::bad_request("You cannot message yourself"));
        }

        // One thread per (buyer, seller, product); reuse it if it exists.
        let thread = match self
            .uow
            .conversations()
            .find_by_triple(buyer_id, seller_id, product_id)
            .await?
        {
            Some(thread) => thread,
            None => {
                self.uow
                    .conversations()
                    .create(buyer_id, seller_id, product_id)
                    .await?
            }
        };

        self.uow
            .conversations()
            .add_message(thread.id, buyer_id, content)
            .await?;

        Ok(thread)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Conversation>> {
        self.uow.conversations().list_for_user(user_id).await
    }

    async fn messages(&self, conversation_id: i32, reader_id: Uuid) -> AppResult<Vec<Message>> {
        self.participant_thread(conversation_id, reader_id).await?;

        // Mark first so the response already shows the counterpart's
        // messages as read.
        self.uow
            .conversations()
            .mark_read(conversation_id, reader_id)
            .await?;
        self.uow.conversations().messages(conversation_id).await
    }

    async fn send(
        &self,
        conversation_id: i32,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Message cannot be empty"));
        }

        self.participant_thread(conversation_id, sender_id).await?;
        self.uow
            .conversations()
            .add_message(conversation_id, sender_id, content)
            .await
    }
}
