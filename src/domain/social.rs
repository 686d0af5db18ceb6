//! Social domain: conversations, messages, favorites, reviews, and reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Buyer-seller conversation about a listing
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: i32,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub product_id: i32,
    pub created_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}

impl Conversation {
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}

/// Message inside a conversation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Message {
    pub id: i32,
    pub conversation_id: i32,
    pub sender_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub sent_at: DateTime<Utc>,
}

/// Favorite mark on a listing
#[derive(Debug, Clone, Serialize)]
pub struct Favorite {
    pub id: i32,
    pub user_id: Uuid,
    pub product_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Product review
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub user_id: Uuid,
    pub product_id: i32,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Report filed against a listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductReport {
    pub id: i32,
    pub reporter_id: Uuid,
    pub product_id: i32,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Initial status of a freshly filed report
pub const REPORT_STATUS_PENDING: &str = "pending";
