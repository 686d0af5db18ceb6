//! Order service - Checkout and order lifecycle.
//!
//! Checkout validates everything up front, then writes the order header,
//! its lines, the optional inline address, and the cart wipe in a single
//! transaction.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    compute_totals, order_code, Order, OrderItem, OrderStatus, PaymentMethod, UpsertAddress,
    UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Checkout payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// An existing address of the buyer
    pub address_id: Option<i32>,
    /// Or a new address supplied inline
    pub new_address: Option<UpsertAddress>,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
}

/// Order with its lines
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    #[schema(value_type = Object)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order service trait for dependency injection.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Place an order from the user's cart
    async fn checkout(&self, buyer_id: Uuid, request: CheckoutRequest) -> AppResult<OrderDetail>;

    /// The buyer's order history
    async fn list_for_buyer(
        &self,
        buyer_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>>;

    /// One order with its lines; the buyer or an admin only
    async fn get_order(&self, id: i32, actor_id: Uuid, role: UserRole) -> AppResult<OrderDetail>;

    /// Orders containing at least one of the seller's listings
    async fn list_for_seller(
        &self,
        seller_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>>;

    /// Move an order along its lifecycle; a seller with lines in it or an admin
    async fn update_status(
        &self,
        id: i32,
        actor_id: Uuid,
        role: UserRole,
        status: OrderStatus,
    ) -> AppResult<Order>;
}

/// Allowed order status transitions.
fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    matches!(
        (from, to),
        (OrderStatus::Preparing, OrderStatus::Shipped)
            | (OrderStatus::Preparing, OrderStatus::Cancelled)
            | (OrderStatus::Shipped, OrderStatus::Delivered)
    )
}

/// Concrete implementation of OrderService using Unit of Work.
pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn checkout(&self, buyer_id: Uuid, request: CheckoutRequest) -> AppResult<OrderDetail> {
        let cart = self
            .uow
            .carts()
            .find_by_user(buyer_id)
            .await?
            .ok_or_else(|| AppError::validation("Cart is empty"))?;

        let lines = self.uow.carts().lines(cart.id).await?;
        if lines.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        // Every line must still point at a live listing.
        for line in &lines {
            let product = self
                .uow
                .products()
                .find_by_id(line.item.product_id)
                .await?
                .ok_or_else(|| AppError::conflict("Product is no longer available"))?;
            if !product.is_available() {
                return Err(AppError::conflict("Product is no longer available"));
            }
        }

        // Either an existing address of the buyer or an inline one.
        let existing_address_id = match (request.address_id, &request.new_address) {
            (Some(id), _) => {
                let address = self
                    .uow
                    .addresses()
                    .find_by_id(id)
                    .await?
                    .ok_or_not_found()?;
                if address.user_id != buyer_id {
                    return Err(AppError::Forbidden);
                }
                Some(id)
            }
            (None, Some(_)) => None,
            (None, None) => return Err(AppError::validation("A shipping address is required")),
        };

        let coupon = match &request.coupon_code {
            Some(code) => {
                let coupon = self
                    .uow
                    .orders()
                    .find_coupon(code)
                    .await?
                    .ok_or_else(|| AppError::validation("Coupon is not valid"))?;
                if !coupon.is_usable(Utc::now()) {
                    return Err(AppError::validation("Coupon is not valid"));
                }
                Some(coupon)
            }
            None => None,
        };

        let totals = compute_totals(&lines, coupon.as_ref(), Utc::now());
        let coupon_id = coupon.map(|c| c.id);
        let code = order_code();
        let payment_method = request.payment_method;
        let new_address = request.new_address;
        let cart_id = cart.id;

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.orders();

                    let address_id = match existing_address_id {
                        Some(id) => Some(id),
                        None => match new_address {
                            Some(upsert) => {
                                Some(repo.create_address(buyer_id, upsert).await?.id)
                            }
                            None => None,
                        },
                    };

                    let order = repo
                        .create_order(
                            code,
                            buyer_id,
                            address_id,
                            coupon_id,
                            payment_method,
                            &totals,
                        )
                        .await?;

                    let mut items = Vec::with_capacity(lines.len());
                    for line in &lines {
                        let item = repo
                            .add_item(
                                order.id,
                                line.item.product_id,
                                line.seller_id,
                                line.unit_price,
                                line.item.quantity,
                            )
                            .await?;
                        items.push(item);
                    }

                    repo.clear_cart(cart_id).await?;

                    Ok(OrderDetail { order, items })
                })
            })
            .await
    }

    async fn list_for_buyer(
        &self,
        buyer_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>> {
        self.uow.orders().list_by_buyer(buyer_id, params).await
    }

    async fn get_order(&self, id: i32, actor_id: Uuid, role: UserRole) -> AppResult<OrderDetail> {
        let order = self.uow.orders().find_by_id(id).await?.ok_or_not_found()?;

        let is_party = order.buyer_id == actor_id
            || self.uow.orders().seller_has_items(id, actor_id).await?;
        if !is_party && !role.is_admin() {
            return Err(AppError::Forbidden);
        }

        let items = self.uow.orders().items(id).await?;
        Ok(OrderDetail { order, items })
    }

    async fn list_for_seller(
        &self,
        seller_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>> {
        self.uow.orders().list_by_seller(seller_id, params).await
    }

    async fn update_status(
        &self,
        id: i32,
        actor_id: Uuid,
        role: UserRole,
        status: OrderStatus,
    ) -> AppResult<Order> {
        let order = self.uow.orders().find_by_id(id).await?.ok_or_not_found()?;

        let is_shipper = self.uow.orders().seller_has_items(id, actor_id).await?;
        if !is_shipper && !role.is_admin() {
            return Err(AppError::Forbidden);
        }

        if !can_transition(order.status, status) {
            return Err(AppError::conflict("Order cannot move to that status"));
        }

        self.uow.orders().set_status(id, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_transitions() {
        assert!(can_transition(OrderStatus::Preparing, OrderStatus::Shipped));
        assert!(can_transition(OrderStatus::Preparing, OrderStatus::Cancelled));
        assert!(can_transition(OrderStatus::Shipped, OrderStatus::Delivered));
        assert!(!can_transition(OrderStatus::Delivered, OrderStatus::Preparing));
        assert!(!can_transition(OrderStatus::Cancelled, OrderStatus::Shipped));
        assert!(!can_transition(OrderStatus::Shipped, OrderStatus::Cancelled));
    }
}
