//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod admin_service;
mod auth_service;
mod cart_service;
mod category_service;
pub mod container;
mod conversation_service;
mod favorite_service;
mod order_service;
mod product_service;
mod profile_service;
mod report_service;
mod review_service;
mod trade_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminManager, AdminService};
pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use cart_service::{CartManager, CartService, CartView};
pub use category_service::{CategoryManager, CategoryService};
pub use conversation_service::{ConversationManager, ConversationService};
pub use favorite_service::{FavoriteManager, FavoriteService};
pub use order_service::{CheckoutRequest, OrderDetail, OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService};
pub use profile_service::{ProfileManager, ProfileService};
pub use report_service::{ReportManager, ReportService};
pub use review_service::{ReviewManager, ReviewService};
pub use trade_service::{TradeDetail, TradeManager, TradeService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
