//! Addresses table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address_line: Option<String>,
    pub address_line2: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Address {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            company_name: m.company_name,
            country: m.country,
            city: m.city,
            address_line: m.address_line,
            address_line2: m.address_line2,
            zip_code: m.zip_code,
        }
    }
}
