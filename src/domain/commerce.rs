//! Commerce domain: carts, orders, and coupons.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{MAX_CART_ITEM_QTY, MIN_CART_ITEM_QTY, ORDER_CODE_PREFIX};
use crate::domain::code::reference_code;

/// Shopping cart, one per user, created lazily on first add
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Line in a shopping cart
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Cart line joined with the listing it refers to
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLine {
    pub item: CartItem,
    pub product_title: String,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    pub seller_id: Uuid,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.item.quantity)
    }
}

/// Clamp a requested cart quantity into the allowed range.
pub fn clamp_cart_quantity(requested: i32) -> i32 {
    requested.clamp(MIN_CART_ITEM_QTY, MAX_CART_ITEM_QTY)
}

/// Order status (stored as a string with a CHECK constraint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "preparing" => Some(OrderStatus::Preparing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    CashOnDelivery,
    CreditCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::CreditCard => "credit_card",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            "credit_card" => Some(PaymentMethod::CreditCard),
            _ => None,
        }
    }
}

/// Order domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i32,
    pub order_code: String,
    pub buyer_id: Uuid,
    pub address_id: Option<i32>,
    pub coupon_id: Option<i32>,
    pub payment_method: Option<PaymentMethod>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount_amount: Decimal,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Line of a placed order with price and seller snapshotted at checkout
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub seller_id: Uuid,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i32,
}

/// Generate a unique order code, e.g. `ORD-9F2K41BC`.
pub fn order_code() -> String {
    format!("{}{}", ORDER_CODE_PREFIX, reference_code())
}

/// Coupon discount kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CouponDiscountType {
    Percentage,
    Fixed,
}

impl CouponDiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponDiscountType::Percentage => "percentage",
            CouponDiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(CouponDiscountType::Percentage),
            "fixed" => Some(CouponDiscountType::Fixed),
            _ => None,
        }
    }
}

/// Discount coupon
#[derive(Debug, Clone, Serialize)]
pub struct Coupon {
    pub id: i32,
    pub code: String,
    pub discount_type: Option<CouponDiscountType>,
    pub discount_value: Option<Decimal>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub status: String,
}

impl Coupon {
    /// A coupon applies only while active and inside its date window.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        if self.status != "active" {
            return false;
        }
        if let Some(start) = self.start_date {
            if now < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if now > end {
                return false;
            }
        }
        true
    }

    /// Discount this coupon grants on a subtotal, never exceeding it.
    pub fn discount_on(&self, subtotal: Decimal) -> Decimal {
        let value = match (self.discount_type, self.discount_value) {
            (Some(CouponDiscountType::Percentage), Some(pct)) => {
                subtotal * pct / Decimal::from(100)
            }
            (Some(CouponDiscountType::Fixed), Some(amount)) => amount,
            _ => Decimal::ZERO,
        };
        value.min(subtotal).max(Decimal::ZERO)
    }
}

/// Checkout totals computed from cart lines and an optional coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount_amount: Decimal,
    pub total_price: Decimal,
}

/// Compute order totals from cart lines and an optional coupon.
pub fn compute_totals(lines: &[CartLine], coupon: Option<&Coupon>, now: DateTime<Utc>) -> OrderTotals {
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
    let shipping_cost = Decimal::ZERO;
    let discount_amount = coupon
        .filter(|c| c.is_usable(now))
        .map(|c| c.discount_on(subtotal))
        .unwrap_or(Decimal::ZERO);

    OrderTotals {
        subtotal,
        shipping_cost,
        discount_amount,
        total_price: subtotal + shipping_cost - discount_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i32, unit_price: i64) -> CartLine {
        CartLine {
            item: CartItem {
                id: 1,
                cart_id: 1,
                product_id: 1,
                quantity: qty,
            },
            product_title: "Item".into(),
            unit_price: Decimal::from(unit_price),
            seller_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn quantity_is_clamped_to_allowed_range() {
        assert_eq!(clamp_cart_quantity(0), 1);
        assert_eq!(clamp_cart_quantity(-5), 1);
        assert_eq!(clamp_cart_quantity(5), 5);
        assert_eq!(clamp_cart_quantity(99), 10);
    }

    #[test]
    fn totals_without_coupon() {
        let lines = vec![line(2, 50), line(1, 30)];
        let totals = compute_totals(&lines, None, Utc::now());
        assert_eq!(totals.subtotal, Decimal::from(130));
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.total_price, Decimal::from(130));
    }

    #[test]
    fn percentage_coupon_discounts_subtotal() {
        let coupon = Coupon {
            id: 1,
            code: "TEN".into(),
            discount_type: Some(CouponDiscountType::Percentage),
            discount_value: Some(Decimal::from(10)),
            start_date: None,
            end_date: None,
            usage_limit: None,
            status: "active".into(),
        };
        let totals = compute_totals(&[line(1, 200)], Some(&coupon), Utc::now());
        assert_eq!(totals.discount_amount, Decimal::from(20));
        assert_eq!(totals.total_price, Decimal::from(180));
    }

    #[test]
    fn fixed_coupon_never_exceeds_subtotal() {
        let coupon = Coupon {
            id: 1,
            code: "BIG".into(),
            discount_type: Some(CouponDiscountType::Fixed),
            discount_value: Some(Decimal::from(500)),
            start_date: None,
            end_date: None,
            usage_limit: None,
            status: "active".into(),
        };
        let totals = compute_totals(&[line(1, 100)], Some(&coupon), Utc::now());
        assert_eq!(totals.discount_amount, Decimal::from(100));
        assert_eq!(totals.total_price, Decimal::ZERO);
    }

    #[test]
    fn expired_coupon_is_ignored() {
        let now = Utc::now();
        let coupon = Coupon {
            id: 1,
            code: "OLD".into(),
            discount_type: Some(CouponDiscountType::Fixed),
            discount_value: Some(Decimal::from(10)),
            start_date: None,
            end_date: Some(now - chrono::Duration::days(1)),
            usage_limit: None,
            status: "active".into(),
        };
        let totals = compute_totals(&[line(1, 100)], Some(&coupon), now);
        assert_eq!(totals.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn order_code_has_prefix_and_length() {
        let code = order_code();
        assert!(code.starts_with(ORDER_CODE_PREFIX));
        assert_eq!(code.len(), ORDER_CODE_PREFIX.len() + 8);
    }
}
