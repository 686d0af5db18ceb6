//! Saved payment cards table.

use sea_orm::entity::prelude::*;

use crate::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub card_holder_name: String,
    pub card_number: String,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
    pub is_default: bool,
    pub created_at: DateTimeUtc,
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

impl From<Model> for domain::UserCard {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            card_holder_name: m.card_holder_name,
            card_number: m.card_number,
            expiry_date: m.expiry_date,
            cvv: m.cvv,
            is_default: m.is_default,
            created_at: m.created_at,
        }
    }
}
