//! Cart service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use bendensana::domain::{CartItem, ProductStatus};
use bendensana::errors::AppError;
use bendensana::infra::{MockCartRepository, MockProductRepository};
use bendensana::services::{CartManager, CartService};

use common::{cart_line, published_product, test_cart, TestUnitOfWork};

fn service(carts: MockCartRepository, products: MockProductRepository) -> CartManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        carts: Arc::new(carts),
        products: Arc::new(products),
        ..Default::default()
    };
    CartManager::new(Arc::new(uow))
}

#[tokio::test]
async fn view_is_empty_without_a_cart() {
    let user_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts.expect_find_by_user().returning(|_| Ok(None));

    let view = service(carts, MockProductRepository::new())
        .view(user_id)
        .await
        .unwrap();

    assert!(view.items.is_empty());
    assert_eq!(view.subtotal, Decimal::ZERO);
}

#[tokio::test]
async fn add_rejects_own_listing() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .with(eq(5))
        .returning(move |id| Ok(Some(published_product(id, user_id))));

    let result = service(MockCartRepository::new(), products)
        .add(user_id, 5, 1)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn add_rejects_sold_listing() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products.expect_find_by_id().returning(|id| {
        let mut product = published_product(id, Uuid::new_v4());
        product.status = ProductStatus::Sold;
        Ok(Some(product))
    });

    let result = service(MockCartRepository::new(), products)
        .add(user_id, 5, 1)
        .await;

    // The 409 body carries this sentence as-is.
    let error = result.unwrap_err();
    assert!(matches!(error, AppError::Conflict(_)));
    assert_eq!(error.to_string(), "Product is no longer available");
}

#[tokio::test]
async fn add_merges_quantities_and_clamps_at_the_cap() {
    let user_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, seller_id))));

    let mut carts = MockCartRepository::new();
    carts
        .expect_find_or_create()
        .returning(|user_id| Ok(test_cart(1, user_id)));
    carts.expect_find_item().with(eq(1), eq(5)).returning(|cart_id, product_id| {
        Ok(Some(CartItem {
            id: 7,
            cart_id,
            product_id,
            quantity: 8,
        }))
    });
    // 8 already in the cart + 5 requested clamps to the max of 10
    carts
        .expect_set_quantity()
        .with(eq(7), eq(10))
        .returning(|item_id, quantity| {
            Ok(CartItem {
                id: item_id,
                cart_id: 1,
                product_id: 5,
                quantity,
            })
        });
    carts.expect_lines().with(eq(1)).returning(move |cart_id| {
        Ok(vec![cart_line(7, cart_id, 5, 10, Decimal::from(150), seller_id)])
    });

    let view = service(carts, products).add(user_id, 5, 5).await.unwrap();

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].item.quantity, 10);
    assert_eq!(view.subtotal, Decimal::from(1500));
}

#[tokio::test]
async fn add_inserts_a_new_line() {
    let user_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, seller_id))));

    let mut carts = MockCartRepository::new();
    carts
        .expect_find_or_create()
        .returning(|user_id| Ok(test_cart(1, user_id)));
    carts.expect_find_item().returning(|_, _| Ok(None));
    carts
        .expect_add_item()
        .with(eq(1), eq(5), eq(2))
        .returning(|cart_id, product_id, quantity| {
            Ok(CartItem {
                id: 7,
                cart_id,
                product_id,
                quantity,
            })
        });
    carts.expect_lines().returning(move |cart_id| {
        Ok(vec![cart_line(7, cart_id, 5, 2, Decimal::from(150), seller_id)])
    });

    let view = service(carts, products).add(user_id, 5, 2).await.unwrap();

    assert_eq!(view.subtotal, Decimal::from(300));
}

#[tokio::test]
async fn update_quantity_rejects_items_from_another_cart() {
    let user_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts
        .expect_find_by_user()
        .returning(|user_id| Ok(Some(test_cart(1, user_id))));
    carts.expect_find_item_by_id().returning(|item_id| {
        Ok(Some(CartItem {
            id: item_id,
            cart_id: 99,
            product_id: 5,
            quantity: 1,
        }))
    });

    let result = service(carts, MockProductRepository::new())
        .update_quantity(user_id, 7, 3)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn remove_unknown_item_is_not_found() {
    let user_id = Uuid::new_v4();

    let mut carts = MockCartRepository::new();
    carts
        .expect_find_by_user()
        .returning(|user_id| Ok(Some(test_cart(1, user_id))));
    carts.expect_find_item_by_id().returning(|_| Ok(None));

    let result = service(carts, MockProductRepository::new())
        .remove(user_id, 7)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
