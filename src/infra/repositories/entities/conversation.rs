//! Conversations table: one thread per buyer/seller/product triple.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub product_id: i32,
    pub created_at: DateTimeUtc,
    pub last_message_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Conversation {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            buyer_id: m.buyer_id,
            seller_id: m.seller_id,
            product_id: m.product_id,
            created_at: m.created_at,
            last_message_at: m.last_message_at,
        }
    }
}
