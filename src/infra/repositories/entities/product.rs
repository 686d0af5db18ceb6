//! Products table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub seller_id: Uuid,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub stock_qty: i32,
    pub gender: Option<String>,
    pub status: String,
    pub is_free_shipping: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SellerId",
        to = "super::user::Column::Id"
    )]
    Seller,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Product {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            seller_id: m.seller_id,
            category_id: m.category_id,
            color_id: m.color_id,
            title: m.title,
            description: m.description,
            price: m.price,
            original_price: m.original_price,
            stock_qty: m.stock_qty,
            gender: m.gender.as_deref().and_then(domain::ProductGender::parse),
            status: domain::ProductStatus::parse(&m.status)
                .unwrap_or(domain::ProductStatus::Draft),
            is_free_shipping: m.is_free_shipping,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
