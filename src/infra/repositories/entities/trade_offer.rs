//! Trade offers table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trade_offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub trade_code: String,
    pub offerer_id: Uuid,
    pub receiver_id: Uuid,
    pub product_id: i32,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub offerer_message: Option<String>,
    pub offered_cash_amount: Option<Decimal>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trade_item::Entity")]
    Items,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::trade_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::TradeOffer {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            trade_code: m.trade_code,
            offerer_id: m.offerer_id,
            receiver_id: m.receiver_id,
            product_id: m.product_id,
            status: domain::TradeOfferStatus::parse(&m.status)
                .unwrap_or(domain::TradeOfferStatus::Pending),
            offerer_message: m.offerer_message,
            offered_cash_amount: m.offered_cash_amount,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
