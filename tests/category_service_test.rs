//! Category service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;

use bendensana::domain::{Category, UpsertCategory};
use bendensana::errors::AppError;
use bendensana::infra::MockCategoryRepository;
use bendensana::services::{CategoryManager, CategoryService};

use common::TestUnitOfWork;

fn category(id: i32, parent_id: Option<i32>) -> Category {
    Category {
        id,
        name: format!("Category {}", id),
        parent_id,
        image_url: None,
    }
}

fn service(categories: MockCategoryRepository) -> CategoryManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        categories: Arc::new(categories),
        ..Default::default()
    };
    CategoryManager::new(Arc::new(uow))
}

#[tokio::test]
async fn tree_groups_children_under_roots() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_list_all().returning(|| {
        Ok(vec![
            category(1, None),
            category(2, None),
            category(3, Some(1)),
            category(4, Some(1)),
        ])
    });

    let tree = service(categories).tree().await.unwrap();

    assert_eq!(tree.len(), 2);
    let root = tree.iter().find(|t| t.id == 1).unwrap();
    assert_eq!(root.children.len(), 2);
    let leaf = tree.iter().find(|t| t.id == 2).unwrap();
    assert!(leaf.children.is_empty());
}

#[tokio::test]
async fn category_cannot_be_its_own_parent() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(category(id, None))));

    let upsert = UpsertCategory {
        name: "Jackets".to_string(),
        parent_id: Some(1),
        image_url: None,
    };
    let result = service(categories).update(1, upsert).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn delete_refuses_while_children_exist() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .returning(|id| Ok(Some(category(id, None))));
    categories.expect_has_children().returning(|_| Ok(true));

    let result = service(categories).delete(1).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn delete_refuses_while_products_reference_it() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .returning(|id| Ok(Some(category(id, None))));
    categories.expect_has_children().returning(|_| Ok(false));
    categories.expect_has_products().returning(|_| Ok(true));

    let result = service(categories).delete(1).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn empty_categories_are_deleted() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .returning(|id| Ok(Some(category(id, None))));
    categories.expect_has_children().returning(|_| Ok(false));
    categories.expect_has_products().returning(|_| Ok(false));
    categories.expect_delete().with(eq(1)).returning(|_| Ok(()));

    let result = service(categories).delete(1).await;

    assert!(result.is_ok());
}
