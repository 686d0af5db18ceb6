//! SeaORM entity definitions for the marketplace schema.

pub mod address;
pub mod cart;
pub mod cart_item;
pub mod category;
pub mod color;
pub mod conversation;
pub mod coupon;
pub mod favorite;
pub mod message;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_image;
pub mod product_report;
pub mod review;
pub mod trade_item;
pub mod trade_offer;
pub mod user;
pub mod user_card;
