//! Orders table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_code: String,
    pub buyer_id: Uuid,
    pub address_id: Option<i32>,
    pub coupon_id: Option<i32>,
    pub payment_method: Option<String>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount_amount: Decimal,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerId",
        to = "super::user::Column::Id"
    )]
    Buyer,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Order {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            order_code: m.order_code,
            buyer_id: m.buyer_id,
            address_id: m.address_id,
            coupon_id: m.coupon_id,
            payment_method: m
                .payment_method
                .as_deref()
                .and_then(domain::PaymentMethod::parse),
            subtotal: m.subtotal,
            shipping_cost: m.shipping_cost,
            discount_amount: m.discount_amount,
            total_price: m.total_price,
            status: domain::OrderStatus::parse(&m.status)
                .unwrap_or(domain::OrderStatus::Preparing),
            created_at: m.created_at,
        }
    }
}
