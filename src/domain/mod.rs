//! Domain layer - Core business entities and logic
//!
//! This module contains the core marketplace models independent of
//! infrastructure concerns: users, the catalog, carts and orders,
//! trade offers, and the social features around listings.

pub mod catalog;
pub mod code;
pub mod commerce;
pub mod password;
pub mod profile;
pub mod social;
pub mod trade;
pub mod user;

pub use catalog::{
    Category, CategoryTree, Color, CreateProduct, Product, ProductGender, ProductImage,
    ProductResponse, ProductStatus, UpsertCategory,
};
pub use commerce::{
    clamp_cart_quantity, compute_totals, order_code, Cart, CartItem, CartLine, Coupon,
    CouponDiscountType, Order, OrderItem, OrderStatus, OrderTotals, PaymentMethod,
};
pub use password::Password;
pub use profile::{Address, CardResponse, UpsertAddress, UpsertCard, UserCard};
pub use social::{Conversation, Favorite, Message, ProductReport, Review, REPORT_STATUS_PENDING};
pub use trade::{
    CreateTradeOffer, TradeDecision, TradeItem, TradeItemType, TradeOffer, TradeOfferStatus,
};
pub use user::{UpdateProfile, User, UserResponse, UserRole};
