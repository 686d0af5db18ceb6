//! Product service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use bendensana::domain::{Category, CreateProduct, UserRole};
use bendensana::errors::AppError;
use bendensana::infra::{MockCategoryRepository, MockProductRepository};
use bendensana::services::{ProductManager, ProductService};

use common::{published_product, TestUnitOfWork};

fn create_payload() -> CreateProduct {
    CreateProduct {
        title: "Vintage denim jacket".to_string(),
        description: None,
        price: Decimal::from(150),
        original_price: None,
        category_id: 1,
        color_id: None,
        gender: None,
        stock_qty: None,
        is_free_shipping: None,
        image_urls: vec![],
    }
}

fn service(
    products: MockProductRepository,
    categories: MockCategoryRepository,
) -> ProductManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        products: Arc::new(products),
        categories: Arc::new(categories),
        ..Default::default()
    };
    ProductManager::new(Arc::new(uow))
}

#[tokio::test]
async fn plain_users_cannot_list() {
    let result = service(MockProductRepository::new(), MockCategoryRepository::new())
        .create_listing(Uuid::new_v4(), UserRole::User, create_payload())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn price_must_be_positive() {
    let mut payload = create_payload();
    payload.price = Decimal::ZERO;

    let result = service(MockProductRepository::new(), MockCategoryRepository::new())
        .create_listing(Uuid::new_v4(), UserRole::Seller, payload)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn category_must_exist() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_find_by_id().returning(|_| Ok(None));

    let result = service(MockProductRepository::new(), categories)
        .create_listing(Uuid::new_v4(), UserRole::Seller, create_payload())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn sellers_create_listings() {
    let seller_id = Uuid::new_v4();

    let mut categories = MockCategoryRepository::new();
    categories.expect_find_by_id().with(eq(1)).returning(|id| {
        Ok(Some(Category {
            id,
            name: "Jackets".to_string(),
            parent_id: None,
            image_url: None,
        }))
    });

    let mut products = MockProductRepository::new();
    products
        .expect_create()
        .returning(|seller_id, create| {
            let mut product = published_product(42, seller_id);
            product.title = create.title;
            Ok(product)
        });
    products.expect_images_for().returning(|_| Ok(vec![]));

    let response = service(products, categories)
        .create_listing(seller_id, UserRole::Seller, create_payload())
        .await
        .unwrap();

    assert_eq!(response.title, "Vintage denim jacket");
    assert_eq!(response.seller_id, seller_id);
}

#[tokio::test]
async fn only_the_owner_or_an_admin_deletes() {
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let result = service(products, MockCategoryRepository::new())
        .delete_listing(5, Uuid::new_v4(), UserRole::Seller)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn admins_delete_any_listing() {
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));
    products.expect_delete().with(eq(5)).returning(|_| Ok(()));

    let result = service(products, MockCategoryRepository::new())
        .delete_listing(5, Uuid::new_v4(), UserRole::Admin)
        .await;

    assert!(result.is_ok());
}
