//! Cart repository - Data access for shopping carts.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::{
    cart::{self, Entity as CartEntity},
    cart_item::{self, Entity as CartItemEntity},
    product::Entity as ProductEntity,
};
use crate::domain::{Cart, CartItem, CartLine};
use crate::errors::{AppError, AppResult};

/// Cart repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Get the user's cart, creating it on first use
    async fn find_or_create(&self, user_id: Uuid) -> AppResult<Cart>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Cart>>;

    /// Cart items joined with product title, price and seller
    async fn lines(&self, cart_id: i32) -> AppResult<Vec<CartLine>>;

    async fn find_item(&self, cart_id: i32, product_id: i32) -> AppResult<Option<CartItem>>;

    async fn find_item_by_id(&self, item_id: i32) -> AppResult<Option<CartItem>>;

    async fn add_item(&self, cart_id: i32, product_id: i32, quantity: i32) -> AppResult<CartItem>;

    async fn set_quantity(&self, item_id: i32, quantity: i32) -> AppResult<CartItem>;

    async fn remove_item(&self, item_id: i32) -> AppResult<()>;

    async fn clear(&self, cart_id: i32) -> AppResult<()>;
}

/// SeaORM-backed cart repository
pub struct CartStore {
    db: DatabaseConnection,
}

impl CartStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn find_or_create(&self, user_id: Uuid) -> AppResult<Cart> {
        if let Some(model) = CartEntity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        {
            return Ok(Cart::from(model));
        }

        let active_model = cart::ActiveModel {
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(Cart::from(model))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Cart>> {
        let result = CartEntity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(result.map(Cart::from))
    }

    async fn lines(&self, cart_id: i32) -> AppResult<Vec<CartLine>> {
        let rows = CartItemEntity::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .find_also_related(ProductEntity)
            .all(&self.db)
            .await?;

        let mut lines = Vec::with_capacity(rows.len());
        for (item, product) in rows {
            // The FK guarantees the product exists; treat a miss as corrupt data
            let product = product.ok_or_else(|| {
                AppError::internal(format!("cart item {} has no product", item.id))
            })?;
            lines.push(CartLine {
                item: CartItem::from(item),
                product_title: product.title.clone(),
                unit_price: product.price,
                seller_id: product.seller_id,
            });
        }
        Ok(lines)
    }

    async fn find_item(&self, cart_id: i32, product_id: i32) -> AppResult<Option<CartItem>> {
        let result = CartItemEntity::find()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .filter(cart_item::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?;
        Ok(result.map(CartItem::from))
    }

    async fn find_item_by_id(&self, item_id: i32) -> AppResult<Option<CartItem>> {
        let result = CartItemEntity::find_by_id(item_id).one(&self.db).await?;
        Ok(result.map(CartItem::from))
    }

    async fn add_item(&self, cart_id: i32, product_id: i32, quantity: i32) -> AppResult<CartItem> {
        let active_model = cart_item::ActiveModel {
            cart_id: Set(cart_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            ..Default::default()
        };
        let model = active_model.insert(&self.db).await?;
        Ok(CartItem::from(model))
    }

    async fn set_quantity(&self, item_id: i32, quantity: i32) -> AppResult<CartItem> {
        let model = CartItemEntity::find_by_id(item_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: cart_item::ActiveModel = model.into();
        active.quantity = Set(quantity);

        let model = active.update(&self.db).await?;
        Ok(CartItem::from(model))
    }

    async fn remove_item(&self, item_id: i32) -> AppResult<()> {
        let result = CartItemEntity::delete_by_id(item_id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn clear(&self, cart_id: i32) -> AppResult<()> {
        CartItemEntity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
