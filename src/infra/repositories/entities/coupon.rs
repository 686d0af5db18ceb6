//! Coupons table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub discount_type: Option<String>,
    pub discount_value: Option<Decimal>,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    pub usage_limit: Option<i32>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Coupon {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            discount_type: m
                .discount_type
                .as_deref()
                .and_then(domain::CouponDiscountType::parse),
            discount_value: m.discount_value,
            start_date: m.start_date,
            end_date: m.end_date,
            usage_limit: m.usage_limit,
            status: m.status,
        }
    }
}
