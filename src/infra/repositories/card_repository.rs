//! Card repository - Data access for saved payment cards.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user_card::{self, Entity as UserCardEntity};
use crate::domain::{UpsertCard, UserCard};
use crate::errors::{AppError, AppResult};

/// Card repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<UserCard>>;

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<UserCard>>;

    async fn create(&self, user_id: Uuid, upsert: UpsertCard) -> AppResult<UserCard>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Make this card the default, clearing the flag on the user's others
    async fn set_default(&self, user_id: Uuid, card_id: i32) -> AppResult<()>;
}

/// SeaORM-backed card repository
pub struct CardStore {
    db: DatabaseConnection,
}

impl CardStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardRepository for CardStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<UserCard>> {
        let result = UserCardEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(UserCard::from))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<UserCard>> {
        let models = UserCardEntity::find()
            .filter(user_card::Column::UserId.eq(user_id))
            .order_by_desc(user_card::Column::IsDefault)
            .order_by_asc(user_card::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(UserCard::from).collect())
    }

    async fn create(&self, user_id: Uuid, upsert: UpsertCard) -> AppResult<UserCard> {
        // The first saved card becomes the default
        let existing = UserCardEntity::find()
            .filter(user_card::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;

        let active_model = user_card::ActiveModel {
            user_id: Set(user_id),
            card_holder_name: Set(upsert.card_holder_name),
            card_number: Set(upsert.card_number),
            expiry_date: Set(upsert.expiry_date),
            cvv: Set(upsert.cvv),
            is_default: Set(existing == 0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(UserCard::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserCardEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn set_default(&self, user_id: Uuid, card_id: i32) -> AppResult<()> {
        UserCardEntity::update_many()
            .col_expr(
                user_card::Column::IsDefault,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(user_card::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        let model = UserCardEntity::find_by_id(card_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user_card::ActiveModel = model.into();
        active.is_default = Set(true);
        active.update(&self.db).await?;
        Ok(())
    }
}
