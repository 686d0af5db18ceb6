//! Address repository - Data access for shipping addresses.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::address::{self, Entity as AddressEntity};
use crate::domain::{Address, UpsertAddress};
use crate::errors::{AppError, AppResult};

/// Address repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Address>>;

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Address>>;

    async fn create(&self, user_id: Uuid, upsert: UpsertAddress) -> AppResult<Address>;

    async fn update(&self, id: i32, upsert: UpsertAddress) -> AppResult<Address>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed address repository
pub struct AddressStore {
    db: DatabaseConnection,
}

impl AddressStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for AddressStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Address>> {
        let result = AddressEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Address::from))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Address>> {
        let models = AddressEntity::find()
            .filter(address::Column::UserId.eq(user_id))
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Address::from).collect())
    }

    async fn create(&self, user_id: Uuid, upsert: UpsertAddress) -> AppResult<Address> {
        let active_model = address::ActiveModel {
            user_id: Set(user_id),
            title: Set(upsert.title),
            company_name: Set(upsert.company_name),
            country: Set(upsert.country),
            city: Set(upsert.city),
            address_line: Set(upsert.address_line),
            address_line2: Set(upsert.address_line2),
            zip_code: Set(upsert.zip_code),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(Address::from(model))
    }

    async fn update(&self, id: i32, upsert: UpsertAddress) -> AppResult<Address> {
        let model = AddressEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: address::ActiveModel = model.into();
        active.title = Set(upsert.title);
        active.company_name = Set(upsert.company_name);
        active.country = Set(upsert.country);
        active.city = Set(upsert.city);
        active.address_line = Set(upsert.address_line);
        active.address_line2 = Set(upsert.address_line2);
        active.zip_code = Set(upsert.zip_code);

        let model = active.update(&self.db).await?;
        Ok(Address::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = AddressEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
