//! Shared test doubles and fixtures for service tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use bendensana::domain::{
    Cart, CartItem, CartLine, Order, OrderStatus, Product, ProductStatus, TradeOffer,
    TradeOfferStatus, User, UserRole,
};
use bendensana::errors::{AppError, AppResult};
use bendensana::infra::{
    AddressRepository, CardRepository, CartRepository, CategoryRepository,
    ConversationRepository, FavoriteRepository, MockAddressRepository, MockCardRepository,
    MockCartRepository, MockCategoryRepository, MockConversationRepository,
    MockFavoriteRepository, MockOrderRepository, MockProductRepository, MockReportRepository,
    MockReviewRepository, MockTradeRepository, MockUserRepository, OrderRepository,
    ProductRepository, ReportRepository, ReviewRepository, TradeRepository,
    TransactionContext, UnitOfWork, UserRepository,
};

/// Test mock for UnitOfWork backed by mockall repositories.
///
/// Construct with struct update syntax, overriding only the repositories
/// a test sets expectations on:
///
/// ```ignore
/// let uow = TestUnitOfWork {
///     products: Arc::new(products),
///     ..Default::default()
/// };
/// ```
pub struct TestUnitOfWork {
    pub users: Arc<MockUserRepository>,
    pub products: Arc<MockProductRepository>,
    pub categories: Arc<MockCategoryRepository>,
    pub carts: Arc<MockCartRepository>,
    pub orders: Arc<MockOrderRepository>,
    pub trades: Arc<MockTradeRepository>,
    pub conversations: Arc<MockConversationRepository>,
    pub favorites: Arc<MockFavoriteRepository>,
    pub reviews: Arc<MockReviewRepository>,
    pub addresses: Arc<MockAddressRepository>,
    pub cards: Arc<MockCardRepository>,
    pub reports: Arc<MockReportRepository>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            products: Arc::new(MockProductRepository::new()),
            categories: Arc::new(MockCategoryRepository::new()),
            carts: Arc::new(MockCartRepository::new()),
            orders: Arc::new(MockOrderRepository::new()),
            trades: Arc::new(MockTradeRepository::new()),
            conversations: Arc::new(MockConversationRepository::new()),
            favorites: Arc::new(MockFavoriteRepository::new()),
            reviews: Arc::new(MockReviewRepository::new()),
            addresses: Arc::new(MockAddressRepository::new()),
            cards: Arc::new(MockCardRepository::new()),
            reports: Arc::new(MockReportRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    fn carts(&self) -> Arc<dyn CartRepository> {
        self.carts.clone()
    }

    fn orders(&self) -> Arc<dyn OrderRepository> {
        self.orders.clone()
    }

    fn trades(&self) -> Arc<dyn TradeRepository> {
        self.trades.clone()
    }

    fn conversations(&self) -> Arc<dyn ConversationRepository> {
        self.conversations.clone()
    }

    fn favorites(&self) -> Arc<dyn FavoriteRepository> {
        self.favorites.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn addresses(&self) -> Arc<dyn AddressRepository> {
        self.addresses.clone()
    }

    fn cards(&self) -> Arc<dyn CardRepository> {
        self.cards.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn test_user(id: Uuid) -> User {
    User {
        id,
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: None,
        profile_image_url: None,
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn published_product(id: i32, seller_id: Uuid) -> Product {
    Product {
        id,
        seller_id,
        category_id: 1,
        color_id: None,
        title: "Vintage denim jacket".to_string(),
        description: None,
        price: Decimal::from(150),
        original_price: None,
        stock_qty: 1,
        gender: None,
        status: ProductStatus::Published,
        is_free_shipping: false,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub fn test_cart(id: i32, user_id: Uuid) -> Cart {
    Cart {
        id,
        user_id,
        created_at: Utc::now(),
    }
}

pub fn cart_line(
    item_id: i32,
    cart_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
    seller_id: Uuid,
) -> CartLine {
    CartLine {
        item: CartItem {
            id: item_id,
            cart_id,
            product_id,
            quantity,
        },
        product_title: "Vintage denim jacket".to_string(),
        unit_price,
        seller_id,
    }
}

pub fn test_order(id: i32, buyer_id: Uuid, status: OrderStatus) -> Order {
    Order {
        id,
        order_code: "ORD-TEST0001".to_string(),
        buyer_id,
        address_id: Some(1),
        coupon_id: None,
        payment_method: None,
        subtotal: Decimal::from(150),
        shipping_cost: Decimal::ZERO,
        discount_amount: Decimal::ZERO,
        total_price: Decimal::from(150),
        status,
        created_at: Utc::now(),
    }
}

pub fn pending_offer(id: i32, offerer_id: Uuid, receiver_id: Uuid, product_id: i32) -> TradeOffer {
    TradeOffer {
        id,
        trade_code: TradeOffer::new_trade_code(),
        offerer_id,
        receiver_id,
        product_id,
        status: TradeOfferStatus::Pending,
        offerer_message: None,
        offered_cash_amount: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}
