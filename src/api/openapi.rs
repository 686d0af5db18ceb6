//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, cart_handler, category_handler, conversation_handler,
    favorite_handler, order_handler, product_handler, profile_handler, report_handler,
    review_handler, trade_handler, user_handler,
};
use crate::domain::{
    Address, CartItem, CartLine, Category, CategoryTree, Color, CreateProduct, CreateTradeOffer,
    Message, OrderItem, OrderStatus, PaymentMethod, ProductGender, ProductImage, ProductReport,
    ProductResponse, ProductStatus, Review, TradeItem, TradeItemType, TradeOfferStatus,
    UpsertAddress, UpsertCard, UpsertCategory, UserResponse, UserRole,
};
use crate::domain::CardResponse;
use crate::services::{CartView, CheckoutRequest, OrderDetail, TokenResponse, TradeDetail};

/// OpenAPI documentation for the BendenSana marketplace API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BendenSana API",
        version = "0.1.0",
        description = "Second-hand marketplace with buying, bartering, and messaging",
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        // Profile
        user_handler::me,
        user_handler::update_me,
        user_handler::change_password,
        profile_handler::list_addresses,
        profile_handler::create_address,
        profile_handler::update_address,
        profile_handler::delete_address,
        profile_handler::list_cards,
        profile_handler::create_card,
        profile_handler::delete_card,
        profile_handler::set_default_card,
        // Catalog
        product_handler::list_products,
        product_handler::get_product,
        product_handler::product_reviews,
        category_handler::category_tree,
        category_handler::list_colors,
        // Listings
        product_handler::create_listing,
        product_handler::my_listings,
        product_handler::delete_listing,
        // Cart and orders
        cart_handler::view_cart,
        cart_handler::add_item,
        cart_handler::update_quantity,
        cart_handler::remove_item,
        order_handler::checkout,
        order_handler::list_orders,
        order_handler::get_order,
        order_handler::seller_orders,
        order_handler::update_order_status,
        // Trades
        trade_handler::create_offer,
        trade_handler::list_offers,
        trade_handler::get_offer,
        trade_handler::decide,
        // Social
        conversation_handler::start_conversation,
        conversation_handler::list_conversations,
        conversation_handler::list_messages,
        conversation_handler::send_message,
        favorite_handler::list_favorites,
        favorite_handler::toggle_favorite,
        review_handler::create_review,
        review_handler::delete_review,
        report_handler::create_report,
        // Admin
        admin_handler::list_users,
        admin_handler::set_role,
        admin_handler::purge_user,
        admin_handler::list_reports,
        admin_handler::dismiss_report,
        admin_handler::ban_product,
        admin_handler::list_categories,
        admin_handler::create_category,
        admin_handler::update_category,
        admin_handler::delete_category,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            ProductStatus,
            ProductGender,
            ProductResponse,
            ProductImage,
            CreateProduct,
            Category,
            CategoryTree,
            UpsertCategory,
            Color,
            CartItem,
            CartLine,
            OrderStatus,
            PaymentMethod,
            OrderItem,
            TradeOfferStatus,
            TradeItemType,
            TradeItem,
            CreateTradeOffer,
            Message,
            Review,
            ProductReport,
            Address,
            UpsertAddress,
            CardResponse,
            UpsertCard,
            // Service types
            TokenResponse,
            CartView,
            CheckoutRequest,
            OrderDetail,
            TradeDetail,
            // Request types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::UpdateProfileRequest,
            user_handler::ChangePasswordRequest,
            cart_handler::AddToCartRequest,
            cart_handler::UpdateQuantityRequest,
            order_handler::UpdateOrderStatusRequest,
            trade_handler::TradeDecisionRequest,
            conversation_handler::StartConversationRequest,
            conversation_handler::SendMessageRequest,
            review_handler::CreateReviewRequest,
            report_handler::CreateReportRequest,
            favorite_handler::FavoriteToggleResponse,
            admin_handler::SetRoleRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Profile", description = "Own profile, addresses, and cards"),
        (name = "Catalog", description = "Public listing catalog"),
        (name = "Listings", description = "Seller listing management"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Orders", description = "Checkout and order lifecycle"),
        (name = "Trades", description = "Barter offers"),
        (name = "Conversations", description = "Buyer-seller messaging"),
        (name = "Favorites", description = "Wishlist"),
        (name = "Reviews", description = "Product reviews"),
        (name = "Reports", description = "Listing reports"),
        (name = "Admin", description = "Administration and moderation")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
