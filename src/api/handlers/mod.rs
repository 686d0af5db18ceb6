//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod cart_handler;
pub mod category_handler;
pub mod conversation_handler;
pub mod favorite_handler;
pub mod order_handler;
pub mod product_handler;
pub mod profile_handler;
pub mod report_handler;
pub mod review_handler;
pub mod trade_handler;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use cart_handler::cart_routes;
pub use category_handler::category_routes;
pub use conversation_handler::conversation_routes;
pub use favorite_handler::favorite_routes;
pub use order_handler::{order_routes, seller_order_routes};
pub use product_handler::{listing_routes, product_routes};
pub use profile_handler::profile_routes;
pub use report_handler::report_routes;
pub use review_handler::review_routes;
pub use trade_handler::trade_routes;
pub use user_handler::user_routes;
