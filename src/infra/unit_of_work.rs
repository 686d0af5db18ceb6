//! Unit of Work pattern implementation.
//!
//! The Unit of Work:
//! - Centralizes access to all repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Ensures consistency across multiple repository operations
//! - Provides atomic operations for checkout, trades, and moderation

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{
    address, cart, cart_item, conversation, favorite, message, order, order_item, product,
    product_report, review, trade_item, trade_offer, user,
};
use super::repositories::{
    AddressRepository, AddressStore, CardRepository, CardStore, CartRepository, CartStore,
    CategoryRepository, CategoryStore, ConversationRepository, ConversationStore,
    FavoriteRepository, FavoriteStore, OrderRepository, OrderStore, ProductRepository,
    ProductStore, ReportRepository, ReportStore, ReviewRepository, ReviewStore, TradeRepository,
    TradeStore, UserRepository, UserStore,
};
use crate::domain::{
    Address, Order, OrderItem, OrderStatus, OrderTotals, PaymentMethod, ProductStatus, TradeItem,
    TradeItemType, TradeOffer, TradeOfferStatus, UpsertAddress,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, construct a test implementation returning mock repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn products(&self) -> Arc<dyn ProductRepository>;
    fn categories(&self) -> Arc<dyn CategoryRepository>;
    fn carts(&self) -> Arc<dyn CartRepository>;
    fn orders(&self) -> Arc<dyn OrderRepository>;
    fn trades(&self) -> Arc<dyn TradeRepository>;
    fn conversations(&self) -> Arc<dyn ConversationRepository>;
    fn favorites(&self) -> Arc<dyn FavoriteRepository>;
    fn reviews(&self) -> Arc<dyn ReviewRepository>;
    fn addresses(&self) -> Arc<dyn AddressRepository>;
    fn cards(&self) -> Arc<dyn CardRepository>;
    fn reports(&self) -> Arc<dyn ReportRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Order creation within this transaction
    pub fn orders(&self) -> TxOrderRepository<'_> {
        TxOrderRepository::new(self.txn)
    }

    /// Trade offer creation and settlement within this transaction
    pub fn trades(&self) -> TxTradeRepository<'_> {
        TxTradeRepository::new(self.txn)
    }

    /// Moderation operations within this transaction
    pub fn admin(&self) -> TxAdminRepository<'_> {
        TxAdminRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    product_repo: Arc<ProductStore>,
    category_repo: Arc<CategoryStore>,
    cart_repo: Arc<CartStore>,
    order_repo: Arc<OrderStore>,
    trade_repo: Arc<TradeStore>,
    conversation_repo: Arc<ConversationStore>,
    favorite_repo: Arc<FavoriteStore>,
    review_repo: Arc<ReviewStore>,
    address_repo: Arc<AddressStore>,
    card_repo: Arc<CardStore>,
    report_repo: Arc<ReportStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            category_repo: Arc::new(CategoryStore::new(db.clone())),
            cart_repo: Arc::new(CartStore::new(db.clone())),
            order_repo: Arc::new(OrderStore::new(db.clone())),
            trade_repo: Arc::new(TradeStore::new(db.clone())),
            conversation_repo: Arc::new(ConversationStore::new(db.clone())),
            favorite_repo: Arc::new(FavoriteStore::new(db.clone())),
            review_repo: Arc::new(ReviewStore::new(db.clone())),
            address_repo: Arc::new(AddressStore::new(db.clone())),
            card_repo: Arc::new(CardStore::new(db.clone())),
            report_repo: Arc::new(ReportStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.cart_repo.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.order_repo.clone()
    }

    fn trades(&self) -> Arc<dyn TradeRepository> {
        self.trade_repo.clone()
    }

    fn conversations(&self) -> Arc<dyn ConversationRepository> {
        self.conversation_repo.clone()
    }

    fn favorites(&self) -> Arc<dyn FavoriteRepository> {
        self.favorite_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }

    fn addresses(&self) -> Arc<dyn AddressRepository> {
        self.address_repo.clone()
    }

    fn cards(&self) -> Arc<dyn CardRepository> {
        self.card_repo.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.report_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f)
            .await
    }
}

/// Transaction-aware order repository.
///
/// Checkout writes the order header, its lines, the optional inline
/// address, and the cart wipe as one atomic unit.
pub struct TxOrderRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxOrderRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Create an address supplied inline at checkout
    pub async fn create_address(
        &self,
        user_id: Uuid,
        upsert: UpsertAddress,
    ) -> AppResult<Address> {
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
        let model = active_model.insert(self.txn).await?;
        Ok(Address::from(model))
    }

    /// Insert the order header
    #[allow(clippy::too_many_arguments)]
    pub async fn create_order(
        &self,
        order_code: String,
        buyer_id: Uuid,
        address_id: Option<i32>,
        coupon_id: Option<i32>,
        payment_method: PaymentMethod,
        totals: &OrderTotals,
    ) -> AppResult<Order> {
        let active_model = order::ActiveModel {
            order_code: Set(order_code),
            buyer_id: Set(buyer_id),
            address_id: Set(address_id),
            coupon_id: Set(coupon_id),
            payment_method: Set(Some(payment_method.as_str().to_string())),
            subtotal: Set(totals.subtotal),
            shipping_cost: Set(totals.shipping_cost),
            discount_amount: Set(totals.discount_amount),
            total_price: Set(totals.total_price),
            status: Set(OrderStatus::Preparing.as_str().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = active_model.insert(self.txn).await?;
        Ok(Order::from(model))
    }

    /// Insert one order line with the price snapshotted from the cart
    pub async fn add_item(
        &self,
        order_id: i32,
        product_id: i32,
        seller_id: Uuid,
        price: Decimal,
        quantity: i32,
    ) -> AppResult<OrderItem> {
        let active_model = order_item::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(product_id),
            seller_id: Set(seller_id),
            price: Set(price),
            quantity: Set(quantity),
            ..Default::default()
        };
        let model = active_model.insert(self.txn).await?;
        Ok(OrderItem::from(model))
    }

    /// Empty the cart once the order is placed
    pub async fn clear_cart(&self, cart_id: i32) -> AppResult<()> {
        cart_item::Entity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart_id))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}

/// Transaction-aware trade repository.
///
/// Creating an offer writes the offer plus its item rows; accepting one
/// flips the status and marks every involved product sold, atomically.
pub struct TxTradeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxTradeRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert the offer header
    pub async fn create_offer(
        &self,
        trade_code: String,
        offerer_id: Uuid,
        receiver_id: Uuid,
        product_id: i32,
        message: Option<String>,
        cash_amount: Option<Decimal>,
    ) -> AppResult<TradeOffer> {
        let active_model = trade_offer::ActiveModel {
            trade_code: Set(trade_code),
            offerer_id: Set(offerer_id),
            receiver_id: Set(receiver_id),
            product_id: Set(product_id),
            status: Set(TradeOfferStatus::Pending.as_str().to_string()),
            offerer_message: Set(message),
            offered_cash_amount: Set(cash_amount),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };
        let model = active_model.insert(self.txn).await?;
        Ok(TradeOffer::from(model))
    }

    /// Attach a product to the offer on either side
    pub async fn add_item(
        &self,
        trade_id: i32,
        product_id: i32,
        item_type: TradeItemType,
    ) -> AppResult<TradeItem> {
        let active_model = trade_item::ActiveModel {
            trade_id: Set(trade_id),
            product_id: Set(product_id),
            item_type: Set(item_type.as_str().to_string()),
            ..Default::default()
        };
        let model = active_model.insert(self.txn).await?;
        Ok(TradeItem::from(model))
    }

    /// Move an offer to a settled status
    pub async fn set_status(&self, id: i32, status: TradeOfferStatus) -> AppResult<TradeOffer> {
        let model = trade_offer::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: trade_offer::ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Some(Utc::now()));

        let model = active.update(self.txn).await?;
        Ok(TradeOffer::from(model))
    }

    /// Mark every product involved in an accepted trade as sold
    pub async fn mark_products_sold(&self, product_ids: Vec<i32>) -> AppResult<()> {
        if product_ids.is_empty() {
            return Ok(());
        }
        product::Entity::update_many()
            .col_expr(
                product::Column::Status,
                sea_orm::sea_query::Expr::value(ProductStatus::Sold.as_str()),
            )
            .col_expr(
                product::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Some(Utc::now())),
            )
            .filter(product::Column::Id.is_in(product_ids))
            .exec(self.txn)
            .await?;
        Ok(())
    }

    /// Product ids attached to an offer, both sides
    pub async fn item_product_ids(&self, trade_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = trade_item::Entity::find()
            .select_only()
            .column(trade_item::Column::ProductId)
            .filter(trade_item::Column::TradeId.eq(trade_id))
            .into_tuple()
            .all(self.txn)
            .await?;
        Ok(ids)
    }
}

/// Transaction-aware moderation repository.
pub struct TxAdminRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAdminRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Delete a user together with everything they own.
    ///
    /// Rows are removed child-first so no foreign key is violated:
    /// trade offers, messages in the user's threads, the threads,
    /// favorites, reviews, orders, the cart, listings, and finally
    /// the account itself.
    pub async fn purge_user(&self, user_id: Uuid) -> AppResult<()> {
        trade_offer::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(trade_offer::Column::OffererId.eq(user_id))
                    .add(trade_offer::Column::ReceiverId.eq(user_id)),
            )
            .exec(self.txn)
            .await?;

        let thread_ids: Vec<i32> = conversation::Entity::find()
            .select_only()
            .column(conversation::Column::Id)
            .filter(
                Condition::any()
                    .add(conversation::Column::BuyerId.eq(user_id))
                    .add(conversation::Column::SellerId.eq(user_id)),
            )
            .into_tuple()
            .all(self.txn)
            .await?;

        if !thread_ids.is_empty() {
            message::Entity::delete_many()
                .filter(message::Column::ConversationId.is_in(thread_ids.clone()))
                .exec(self.txn)
                .await?;
            conversation::Entity::delete_many()
                .filter(conversation::Column::Id.is_in(thread_ids))
                .exec(self.txn)
                .await?;
        }

        favorite::Entity::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        review::Entity::delete_many()
            .filter(review::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        let order_ids: Vec<i32> = order::Entity::find()
            .select_only()
            .column(order::Column::Id)
            .filter(order::Column::BuyerId.eq(user_id))
            .into_tuple()
            .all(self.txn)
            .await?;

        if !order_ids.is_empty() {
            order_item::Entity::delete_many()
                .filter(order_item::Column::OrderId.is_in(order_ids.clone()))
                .exec(self.txn)
                .await?;
            order::Entity::delete_many()
                .filter(order::Column::Id.is_in(order_ids))
                .exec(self.txn)
                .await?;
        }

        // Lines sold by this user sit inside other buyers' orders and carry
        // a restrict FK, so they have to go before the user row can.
        order_item::Entity::delete_many()
            .filter(order_item::Column::SellerId.eq(user_id))
            .exec(self.txn)
            .await?;

        let cart_ids: Vec<i32> = cart::Entity::find()
            .select_only()
            .column(cart::Column::Id)
            .filter(cart::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.txn)
            .await?;

        if !cart_ids.is_empty() {
            cart_item::Entity::delete_many()
                .filter(cart_item::Column::CartId.is_in(cart_ids.clone()))
                .exec(self.txn)
                .await?;
            cart::Entity::delete_many()
                .filter(cart::Column::Id.is_in(cart_ids))
                .exec(self.txn)
                .await?;
        }

        product::Entity::delete_many()
            .filter(product::Column::SellerId.eq(user_id))
            .exec(self.txn)
            .await?;

        let result = user::Entity::delete_by_id(user_id).exec(self.txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Remove a reported listing and the report that flagged it
    pub async fn ban_product(&self, product_id: i32, report_id: i32) -> AppResult<()> {
        let deleted = product::Entity::delete_by_id(product_id)
            .exec(self.txn)
            .await?;
        if deleted.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        product_report::Entity::delete_by_id(report_id)
            .exec(self.txn)
            .await?;
        Ok(())
    }
}
