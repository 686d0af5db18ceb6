//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{
    AdminService, AuthService, CartService, CategoryService, ConversationService, FavoriteService,
    OrderService, ProductService, ProfileService, ReportService, ReviewService, TradeService,
    UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;

    /// Get category service
    fn categories(&self) -> Arc<dyn CategoryService>;

    /// Get cart service
    fn carts(&self) -> Arc<dyn CartService>;

    /// Get order service
    fn orders(&self) -> Arc<dyn OrderService>;

    /// Get trade service
    fn trades(&self) -> Arc<dyn TradeService>;

    /// Get conversation service
    fn conversations(&self) -> Arc<dyn ConversationService>;

    /// Get favorite service
    fn favorites(&self) -> Arc<dyn FavoriteService>;

    /// Get review service
    fn reviews(&self) -> Arc<dyn ReviewService>;

    /// Get profile service
    fn profiles(&self) -> Arc<dyn ProfileService>;

    /// Get report service
    fn reports(&self) -> Arc<dyn ReportService>;

    /// Get admin service
    fn admin(&self) -> Arc<dyn AdminService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    product_service: Arc<dyn ProductService>,
    category_service: Arc<dyn CategoryService>,
    cart_service: Arc<dyn CartService>,
    order_service: Arc<dyn OrderService>,
    trade_service: Arc<dyn TradeService>,
    conversation_service: Arc<dyn ConversationService>,
    favorite_service: Arc<dyn FavoriteService>,
    review_service: Arc<dyn ReviewService>,
    profile_service: Arc<dyn ProfileService>,
    report_service: Arc<dyn ReportService>,
    admin_service: Arc<dyn AdminService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            AdminManager, Authenticator, CartManager, CategoryManager, ConversationManager,
            FavoriteManager, OrderManager, ProductManager, ProfileManager, ReportManager,
            ReviewManager, TradeManager, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            product_service: Arc::new(ProductManager::new(uow.clone())),
            category_service: Arc::new(CategoryManager::new(uow.clone())),
            cart_service: Arc::new(CartManager::new(uow.clone())),
            order_service: Arc::new(OrderManager::new(uow.clone())),
            trade_service: Arc::new(TradeManager::new(uow.clone())),
            conversation_service: Arc::new(ConversationManager::new(uow.clone())),
            favorite_service: Arc::new(FavoriteManager::new(uow.clone())),
            review_service: Arc::new(ReviewManager::new(uow.clone())),
            profile_service: Arc::new(ProfileManager::new(uow.clone())),
            report_service: Arc::new(ReportManager::new(uow.clone())),
            admin_service: Arc::new(AdminManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }

    fn carts(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    fn orders(&self) -> Arc<dyn OrderService> {
        self.order_service.clone()
    }

    fn trades(&self) -> Arc<dyn TradeService> {
        self.trade_service.clone()
    }

    fn conversations(&self) -> Arc<dyn ConversationService> {
        self.conversation_service.clone()
    }

    fn favorites(&self) -> Arc<dyn FavoriteService> {
        self.favorite_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }
}
