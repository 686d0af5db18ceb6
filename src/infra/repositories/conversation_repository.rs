//! Conversation repository - Data access for buyer/seller messaging.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{
    conversation::{self, Entity as ConversationEntity},
    message::{self, Entity as MessageEntity},
};
use crate::domain::{Conversation, Message};
use crate::errors::{AppError, AppResult};

/// Conversation repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Conversation>>;

    /// Find the thread for a buyer/seller/product triple
    async fn find_by_triple(
        &self,
        buyer_id: Uuid,
        seller_id: Uuid,
        product_id: i32,
    ) -> AppResult<Option<Conversation>>;

    async fn create(
        &self,
        buyer_id: Uuid,
        seller_id: Uuid,
        product_id: i32,
    ) -> AppResult<Conversation>;

    /// Threads the user participates in, most recently active first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Conversation>>;

    async fn messages(&self, conversation_id: i32) -> AppResult<Vec<Message>>;

    /// Append a message and bump the thread's last activity timestamp
    async fn add_message(
        &self,
        conversation_id: i32,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message>;

    /// Mark all messages sent by the other party as read
    async fn mark_read(&self, conversation_id: i32, reader_id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed conversation repository
pub struct ConversationStore {
    db: DatabaseConnection,
}

impl ConversationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConversationRepository for ConversationStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Conversation>> {
        let result = ConversationEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Conversation::from))
    }

    async fn find_by_triple(
        &self,
        buyer_id: Uuid,
        seller_id: Uuid,
        product_id: i32,
    ) -> AppResult<Option<Conversation>> {
        let result = ConversationEntity::find()
            .filter(conversation::Column::BuyerId.eq(buyer_id))
            .filter(conversation::Column::SellerId.eq(seller_id))
            .filter(conversation::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?;
        Ok(result.map(Conversation::from))
    }

    async fn create(
        &self,
        buyer_id: Uuid,
        seller_id: Uuid,
        product_id: i32,
    ) -> AppResult<Conversation> {
        let now = Utc::now();
        let active_model = conversation::ActiveModel {
            buyer_id: Set(buyer_id),
            seller_id: Set(seller_id),
            product_id: Set(product_id),
            created_at: Set(now),
            last_message_at: Set(now),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(Conversation::from(model))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Conversation>> {
        let models = ConversationEntity::find()
            .filter(
                Condition::any()
                    .add(conversation::Column::BuyerId.eq(user_id))
                    .add(conversation::Column::SellerId.eq(user_id)),
            )
            .order_by_desc(conversation::Column::LastMessageAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Conversation::from).collect())
    }

    async fn messages(&self, conversation_id: i32) -> AppResult<Vec<Message>> {
        let models = MessageEntity::find()
            .filter(message::Column::ConversationId.eq(conversation_id))
            .order_by_asc(message::Column::SentAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Message::from).collect())
    }

    async fn add_message(
        &self,
        conversation_id: i32,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        let now = Utc::now();
        let active_model = message::ActiveModel {
            conversation_id: Set(conversation_id),
            sender_id: Set(sender_id),
            content: Set(content),
            is_read: Set(false),
            sent_at: Set(now),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;

        let thread = ConversationEntity::find_by_id(conversation_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        let mut active: conversation::ActiveModel = thread.into();
        active.last_message_at = Set(now);
        active.update(&self.db).await?;

        Ok(Message::from(model))
    }

    async fn mark_read(&self, conversation_id: i32, reader_id: Uuid) -> AppResult<()> {
        MessageEntity::update_many()
            .col_expr(message::Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(message::Column::ConversationId.eq(conversation_id))
            .filter(message::Column::SenderId.ne(reader_id))
            .filter(message::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
