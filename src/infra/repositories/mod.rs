//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod address_repository;
mod card_repository;
mod cart_repository;
mod category_repository;
mod conversation_repository;
pub(crate) mod entities;
mod favorite_repository;
mod order_repository;
mod product_repository;
mod report_repository;
mod review_repository;
mod trade_repository;
mod user_repository;

pub use address_repository::{AddressRepository, AddressStore};
pub use card_repository::{CardRepository, CardStore};
pub use cart_repository::{CartRepository, CartStore};
pub use category_repository::{CategoryRepository, CategoryStore};
pub use conversation_repository::{ConversationRepository, ConversationStore};
pub use favorite_repository::{FavoriteRepository, FavoriteStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductFilter, ProductRepository, ProductStore};
pub use report_repository::{ReportRepository, ReportStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use trade_repository::{TradeRepository, TradeStore};
pub use user_repository::{NewUser, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use address_repository::MockAddressRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use card_repository::MockCardRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use conversation_repository::MockConversationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use report_repository::MockReportRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use trade_repository::MockTradeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
