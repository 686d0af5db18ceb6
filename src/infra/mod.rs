//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching (Redis)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    AddressRepository, CardRepository, CartRepository, CategoryRepository,
    ConversationRepository, FavoriteRepository, NewUser, OrderRepository, ProductFilter,
    ProductRepository, ReportRepository, ReviewRepository, TradeRepository, UserRepository,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxAdminRepository, TxOrderRepository, TxTradeRepository,
    UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAddressRepository, MockCardRepository, MockCartRepository, MockCategoryRepository,
    MockConversationRepository, MockFavoriteRepository, MockOrderRepository,
    MockProductRepository, MockReportRepository, MockReviewRepository, MockTradeRepository,
    MockUserRepository,
};
