//! Cart service - Shopping cart management.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{clamp_cart_quantity, CartLine};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Cart contents returned to the client
#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
}

impl CartView {
    pub fn new(items: Vec<CartLine>) -> Self {
        let subtotal = items.iter().map(CartLine::line_total).sum();
        Self { items, subtotal }
    }
}

/// Cart service trait for dependency injection.
#[async_trait]
pub trait CartService: Send + Sync {
    /// The user's cart contents with a running subtotal
    async fn view(&self, user_id: Uuid) -> AppResult<CartView>;

    /// Add a product; quantities merge and clamp into the allowed range
    async fn add(&self, user_id: Uuid, product_id: i32, quantity: i32) -> AppResult<CartView>;

    /// Set the quantity of an item in the user's cart
    async fn update_quantity(
        &self,
        user_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> AppResult<CartView>;

    /// Remove an item from the user's cart
    async fn remove(&self, user_id: Uuid, item_id: i32) -> AppResult<CartView>;
}

/// Concrete implementation of CartService using Unit of Work.
pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn view_cart(&self, cart_id: i32) -> AppResult<CartView> {
        let lines = self.uow.carts().lines(cart_id).await?;
        Ok(CartView::new(lines))
    }

    /// Resolve an item id to the user's own cart, or fail
    async fn owned_item(&self, user_id: Uuid, item_id: i32) -> AppResult<(i32, i32)> {
        let cart = self
            .uow
            .carts()
            .find_by_user(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let item = self
            .uow
            .carts()
            .find_item_by_id(item_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if item.cart_id != cart.id {
            return Err(AppError::Forbidden);
        }
        Ok((cart.id, item.id))
    }
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn view(&self, user_id: Uuid) -> AppResult<CartView> {
        match self.uow.carts().find_by_user(user_id).await? {
            Some(cart) => self.view_cart(cart.id).await,
            None => Ok(CartView::new(Vec::new())),
        }
    }

    async fn add(&self, user_id: Uuid, product_id: i32, quantity: i32) -> AppResult<CartView> {
        let product = self
            .uow
            .products()
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        if !product.is_available() {
            return Err(AppError::conflict("Product is no longer available"));
        }
        if product.is_owned_by(user_id) {
            return Err(AppError::bad_request("You cannot buy your own listing"));
        }

        let cart = self.uow.carts().find_or_create(user_id).await?;

        match self.uow.carts().find_item(cart.id, product_id).await? {
            Some(existing) => {
                let merged = clamp_cart_quantity(existing.quantity.saturating_add(quantity));
                self.uow.carts().set_quantity(existing.id, merged).await?;
            }
            None => {
                let quantity = clamp_cart_quantity(quantity);
                self.uow.carts().add_item(cart.id, product_id, quantity).await?;
            }
        }

        self.view_cart(cart.id).await
    }

    async fn update_quantity(
        &self,
        user_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> AppResult<CartView> {
        let (cart_id, item_id) = self.owned_item(user_id, item_id).await?;
        let quantity = clamp_cart_quantity(quantity);
        self.uow.carts().set_quantity(item_id, quantity).await?;
        self.view_cart(cart_id).await
    }

    async fn remove(&self, user_id: Uuid, item_id: i32) -> AppResult<CartView> {
        let (cart_id, item_id) = self.owned_item(user_id, item_id).await?;
        self.uow.carts().remove_item(item_id).await?;
        self.view_cart(cart_id).await
    }
}
