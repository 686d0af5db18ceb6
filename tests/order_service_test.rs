//! Order service unit tests.
//!
//! The happy checkout path runs inside a database transaction and is
//! covered by integration against a real database; these tests exercise
//! the validation that happens before the transaction begins.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use bendensana::domain::{Address, Coupon, OrderStatus, PaymentMethod, UserRole};
use bendensana::errors::AppError;
use bendensana::infra::{
    MockAddressRepository, MockCartRepository, MockOrderRepository, MockProductRepository,
};
use bendensana::services::{CheckoutRequest, OrderManager, OrderService};

use common::{cart_line, published_product, test_cart, test_order, TestUnitOfWork};

fn checkout_request() -> CheckoutRequest {
    CheckoutRequest {
        address_id: Some(1),
        new_address: None,
        coupon_code: None,
        payment_method: PaymentMethod::CreditCard,
    }
}

fn buyer_address(id: i32, user_id: Uuid) -> Address {
    Address {
        id,
        user_id,
        title: Some("Home".to_string()),
        company_name: None,
        country: None,
        city: None,
        address_line: None,
        address_line2: None,
        zip_code: None,
    }
}

#[tokio::test]
async fn checkout_requires_a_non_empty_cart() {
    let buyer_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts
        .expect_find_by_user()
        .returning(|user_id| Ok(Some(test_cart(1, user_id))));
    carts.expect_lines().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork {
        carts: Arc::new(carts),
        ..Default::default()
    };
    let result = OrderManager::new(Arc::new(uow))
        .checkout(buyer_id, checkout_request())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn checkout_rejects_lines_pointing_at_sold_listings() {
    let buyer_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts
        .expect_find_by_user()
        .returning(|user_id| Ok(Some(test_cart(1, user_id))));
    carts.expect_lines().returning(move |cart_id| {
        Ok(vec![cart_line(7, cart_id, 5, 1, Decimal::from(150), seller_id)])
    });

    let mut products = MockProductRepository::new();
    products.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        carts: Arc::new(carts),
        products: Arc::new(products),
        ..Default::default()
    };
    let result = OrderManager::new(Arc::new(uow))
        .checkout(buyer_id, checkout_request())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

fn cart_with_one_live_line(
    seller_id: Uuid,
) -> (MockCartRepository, MockProductRepository) {
    let mut carts = MockCartRepository::new();
    carts
        .expect_find_by_user()
        .returning(|user_id| Ok(Some(test_cart(1, user_id))));
    carts.expect_lines().returning(move |cart_id| {
        Ok(vec![cart_line(7, cart_id, 5, 1, Decimal::from(150), seller_id)])
    });

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, seller_id))));

    (carts, products)
}

#[tokio::test]
async fn checkout_requires_a_shipping_address() {
    let buyer_id = Uuid::new_v4();
    let (carts, products) = cart_with_one_live_line(Uuid::new_v4());

    let uow = TestUnitOfWork {
        carts: Arc::new(carts),
        products: Arc::new(products),
        ..Default::default()
    };
    let request = CheckoutRequest {
        address_id: None,
        new_address: None,
        coupon_code: None,
        payment_method: PaymentMethod::CreditCard,
    };
    let result = OrderManager::new(Arc::new(uow)).checkout(buyer_id, request).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn checkout_rejects_someone_elses_address() {
    let buyer_id = Uuid::new_v4();
    let (carts, products) = cart_with_one_live_line(Uuid::new_v4());

    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(buyer_address(id, Uuid::new_v4()))));

    let uow = TestUnitOfWork {
        carts: Arc::new(carts),
        products: Arc::new(products),
        addresses: Arc::new(addresses),
        ..Default::default()
    };
    let result = OrderManager::new(Arc::new(uow))
        .checkout(buyer_id, checkout_request())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn checkout_rejects_an_expired_coupon() {
    let buyer_id = Uuid::new_v4();
    let (carts, products) = cart_with_one_live_line(Uuid::new_v4());

    let mut addresses = MockAddressRepository::new();
    addresses
        .expect_find_by_id()
        .returning(move |id| Ok(Some(buyer_address(id, buyer_id))));

    let mut orders = MockOrderRepository::new();
    orders.expect_find_coupon().with(eq("OLD10")).returning(|code| {
        Ok(Some(Coupon {
            id: 3,
            code: code.to_string(),
            discount_type: None,
            discount_value: None,
            start_date: None,
            end_date: Some(Utc::now() - Duration::days(30)),
            usage_limit: None,
            status: "active".to_string(),
        }))
    });

    let uow = TestUnitOfWork {
        carts: Arc::new(carts),
        products: Arc::new(products),
        addresses: Arc::new(addresses),
        orders: Arc::new(orders),
        ..Default::default()
    };
    let request = CheckoutRequest {
        coupon_code: Some("OLD10".to_string()),
        ..checkout_request()
    };
    let result = OrderManager::new(Arc::new(uow)).checkout(buyer_id, request).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn strangers_cannot_read_an_order() {
    let stranger = Uuid::new_v4();

    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_order(id, Uuid::new_v4(), OrderStatus::Preparing))));
    orders.expect_seller_has_items().returning(|_, _| Ok(false));

    let uow = TestUnitOfWork {
        orders: Arc::new(orders),
        ..Default::default()
    };
    let result = OrderManager::new(Arc::new(uow))
        .get_order(1, stranger, UserRole::User)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn admins_can_read_any_order() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_order(id, Uuid::new_v4(), OrderStatus::Preparing))));
    orders.expect_seller_has_items().returning(|_, _| Ok(false));
    orders.expect_items().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork {
        orders: Arc::new(orders),
        ..Default::default()
    };
    let detail = OrderManager::new(Arc::new(uow))
        .get_order(1, Uuid::new_v4(), UserRole::Admin)
        .await
        .unwrap();

    assert_eq!(detail.order.id, 1);
}

#[tokio::test]
async fn update_status_requires_a_selling_party() {
    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_order(id, Uuid::new_v4(), OrderStatus::Preparing))));
    orders.expect_seller_has_items().returning(|_, _| Ok(false));

    let uow = TestUnitOfWork {
        orders: Arc::new(orders),
        ..Default::default()
    };
    let result = OrderManager::new(Arc::new(uow))
        .update_status(1, Uuid::new_v4(), UserRole::Seller, OrderStatus::Shipped)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn update_status_rejects_an_illegal_transition() {
    let seller_id = Uuid::new_v4();

    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_order(id, Uuid::new_v4(), OrderStatus::Preparing))));
    orders.expect_seller_has_items().returning(|_, _| Ok(true));

    let uow = TestUnitOfWork {
        orders: Arc::new(orders),
        ..Default::default()
    };
    let result = OrderManager::new(Arc::new(uow))
        .update_status(1, seller_id, UserRole::Seller, OrderStatus::Delivered)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn update_status_ships_a_preparing_order() {
    let seller_id = Uuid::new_v4();

    let mut orders = MockOrderRepository::new();
    orders
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_order(id, Uuid::new_v4(), OrderStatus::Preparing))));
    orders.expect_seller_has_items().returning(|_, _| Ok(true));
    orders
        .expect_set_status()
        .with(eq(1), eq(OrderStatus::Shipped))
        .returning(|id, status| Ok(test_order(id, Uuid::new_v4(), status)));

    let uow = TestUnitOfWork {
        orders: Arc::new(orders),
        ..Default::default()
    };
    let order = OrderManager::new(Arc::new(uow))
        .update_status(1, seller_id, UserRole::Seller, OrderStatus::Shipped)
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Shipped);
}
