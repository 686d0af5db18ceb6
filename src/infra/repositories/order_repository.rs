//! Order repository - Read and status access for placed orders.
//!
//! Order creation is transactional and lives in the unit of work.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::{
    coupon::{self, Entity as CouponEntity},
    order::{self, Entity as OrderEntity},
    order_item::{self, Entity as OrderItemEntity},
};
use crate::domain::{Coupon, Order, OrderItem, OrderStatus};
use crate::errors::{AppError, AppResult};
use crate::types::{Paginated, PaginationParams};

/// Order repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Order>>;

    async fn items(&self, order_id: i32) -> AppResult<Vec<OrderItem>>;

    async fn list_by_buyer(
        &self,
        buyer_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>>;

    /// Orders containing at least one item sold by this seller
    async fn list_by_seller(
        &self,
        seller_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>>;

    async fn seller_has_items(&self, order_id: i32, seller_id: Uuid) -> AppResult<bool>;

    async fn set_status(&self, order_id: i32, status: OrderStatus) -> AppResult<Order>;

    async fn find_coupon(&self, code: &str) -> AppResult<Option<Coupon>>;
}

/// SeaORM-backed order repository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Order>> {
        let result = OrderEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Order::from))
    }

    async fn items(&self, order_id: i32) -> AppResult<Vec<OrderItem>> {
        let models = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(OrderItem::from).collect())
    }

    async fn list_by_buyer(
        &self,
        buyer_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>> {
        let paginator = OrderEntity::find()
            .filter(order::Column::BuyerId.eq(buyer_id))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok(Paginated::new(
            models.into_iter().map(Order::from).collect(),
            params.page,
            params.limit(),
            total,
        ))
    }

    async fn list_by_seller(
        &self,
        seller_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<Paginated<Order>> {
        let order_ids: Vec<i32> = OrderItemEntity::find()
            .select_only()
            .column(order_item::Column::OrderId)
            .filter(order_item::Column::SellerId.eq(seller_id))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        if order_ids.is_empty() {
            return Ok(Paginated::new(Vec::new(), params.page, params.limit(), 0));
        }

        let paginator = OrderEntity::find()
            .filter(order::Column::Id.is_in(order_ids))
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok(Paginated::new(
            models.into_iter().map(Order::from).collect(),
            params.page,
            params.limit(),
            total,
        ))
    }

    async fn seller_has_items(&self, order_id: i32, seller_id: Uuid) -> AppResult<bool> {
        let count = OrderItemEntity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .filter(order_item::Column::SellerId.eq(seller_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn set_status(&self, order_id: i32, status: OrderStatus) -> AppResult<Order> {
        let model = OrderEntity::find_by_id(order_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: order::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());

        let model = active.update(&self.db).await?;
        Ok(Order::from(model))
    }

    async fn find_coupon(&self, code: &str) -> AppResult<Option<Coupon>> {
        let result = CouponEntity::find()
            .filter(coupon::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(result.map(Coupon::from))
    }
}
