//! Trade items table: products attached to an offer on either side.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trade_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub trade_id: i32,
    pub product_id: i32,
    pub item_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trade_offer::Entity",
        from = "Column::TradeId",
        to = "super::trade_offer::Column::Id"
    )]
    Trade,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::trade_offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trade.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::TradeItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            trade_id: m.trade_id,
            product_id: m.product_id,
            item_type: domain::TradeItemType::parse(&m.item_type)
                .unwrap_or(domain::TradeItemType::Offered),
        }
    }
}
