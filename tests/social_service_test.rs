//! Favorite, review, and report service unit tests.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use bendensana::domain::{Favorite, ProductReport, Review, UserRole, REPORT_STATUS_PENDING};
use bendensana::errors::AppError;
use bendensana::infra::{
    MockFavoriteRepository, MockProductRepository, MockReportRepository, MockReviewRepository,
};
use bendensana::services::{
    FavoriteManager, FavoriteService, ReportManager, ReportService, ReviewManager, ReviewService,
};

use common::{published_product, TestUnitOfWork};

// =============================================================================
// Favorites
// =============================================================================

fn favorite_service(
    favorites: MockFavoriteRepository,
    products: MockProductRepository,
) -> FavoriteManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        favorites: Arc::new(favorites),
        products: Arc::new(products),
        ..Default::default()
    };
    FavoriteManager::new(Arc::new(uow))
}

#[tokio::test]
async fn toggle_adds_a_missing_favorite() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let mut favorites = MockFavoriteRepository::new();
    favorites.expect_find().returning(|_, _| Ok(None));
    favorites.expect_add().with(eq(user_id), eq(5)).returning(|user_id, product_id| {
        Ok(Favorite {
            id: 1,
            user_id,
            product_id,
            created_at: Utc::now(),
        })
    });

    let favorited = favorite_service(favorites, products)
        .toggle(user_id, 5)
        .await
        .unwrap();

    assert!(favorited);
}

#[tokio::test]
async fn toggle_removes_an_existing_favorite() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let mut favorites = MockFavoriteRepository::new();
    favorites.expect_find().returning(|user_id, product_id| {
        Ok(Some(Favorite {
            id: 1,
            user_id,
            product_id,
            created_at: Utc::now(),
        }))
    });
    favorites
        .expect_remove()
        .with(eq(user_id), eq(5))
        .returning(|_, _| Ok(()));

    let favorited = favorite_service(favorites, products)
        .toggle(user_id, 5)
        .await
        .unwrap();

    assert!(!favorited);
}

#[tokio::test]
async fn toggle_on_unknown_product_is_not_found() {
    let mut products = MockProductRepository::new();
    products.expect_find_by_id().returning(|_| Ok(None));

    let result = favorite_service(MockFavoriteRepository::new(), products)
        .toggle(Uuid::new_v4(), 5)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

// =============================================================================
// Reviews
// =============================================================================

fn review_service(
    reviews: MockReviewRepository,
    products: MockProductRepository,
) -> ReviewManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        reviews: Arc::new(reviews),
        products: Arc::new(products),
        ..Default::default()
    };
    ReviewManager::new(Arc::new(uow))
}

fn review(id: i32, user_id: Uuid) -> Review {
    Review {
        id,
        user_id,
        product_id: 5,
        rating: Some(4),
        comment: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn rating_must_be_in_range() {
    let service = review_service(MockReviewRepository::new(), MockProductRepository::new());

    for rating in [0, 6, -1] {
        let result = service.add(Uuid::new_v4(), 5, rating, None).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }
}

#[tokio::test]
async fn cannot_review_own_listing() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, user_id))));

    let result = review_service(MockReviewRepository::new(), products)
        .add(user_id, 5, 4, None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn one_review_per_user_per_listing() {
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let mut reviews = MockReviewRepository::new();
    reviews.expect_user_reviewed().returning(|_, _| Ok(true));

    let result = review_service(reviews, products)
        .add(Uuid::new_v4(), 5, 4, None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn first_review_is_created() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let mut reviews = MockReviewRepository::new();
    reviews.expect_user_reviewed().returning(|_, _| Ok(false));
    reviews
        .expect_create()
        .with(eq(user_id), eq(5), eq(Some(4)), eq(Some("Great jacket".to_string())))
        .returning(|user_id, product_id, rating, comment| {
            Ok(Review {
                id: 1,
                user_id,
                product_id,
                rating,
                comment,
                created_at: Utc::now(),
            })
        });

    let review = review_service(reviews, products)
        .add(user_id, 5, 4, Some("Great jacket".to_string()))
        .await
        .unwrap();

    assert_eq!(review.rating, Some(4));
}

#[tokio::test]
async fn only_the_author_or_an_admin_deletes_a_review() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .returning(|id| Ok(Some(review(id, Uuid::new_v4()))));

    let result = review_service(reviews, MockProductRepository::new())
        .delete(1, Uuid::new_v4(), UserRole::User)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn admins_delete_any_review() {
    let mut reviews = MockReviewRepository::new();
    reviews
        .expect_find_by_id()
        .returning(|id| Ok(Some(review(id, Uuid::new_v4()))));
    reviews.expect_delete().with(eq(1)).returning(|_| Ok(()));

    let result = review_service(reviews, MockProductRepository::new())
        .delete(1, Uuid::new_v4(), UserRole::Admin)
        .await;

    assert!(result.is_ok());
}

// =============================================================================
// Reports
// =============================================================================

fn report_service(
    reports: MockReportRepository,
    products: MockProductRepository,
) -> ReportManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        reports: Arc::new(reports),
        products: Arc::new(products),
        ..Default::default()
    };
    ReportManager::new(Arc::new(uow))
}

#[tokio::test]
async fn report_needs_a_reason() {
    let result = report_service(MockReportRepository::new(), MockProductRepository::new())
        .file(Uuid::new_v4(), 5, "  ".to_string(), None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn cannot_report_own_listing() {
    let user_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(move |id| Ok(Some(published_product(id, user_id))));

    let result = report_service(MockReportRepository::new(), products)
        .file(user_id, 5, "counterfeit".to_string(), None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn one_report_per_user_per_listing() {
    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let mut reports = MockReportRepository::new();
    reports.expect_already_reported().returning(|_, _| Ok(true));

    let result = report_service(reports, products)
        .file(Uuid::new_v4(), 5, "counterfeit".to_string(), None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn filed_reports_start_pending() {
    let reporter_id = Uuid::new_v4();

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_id()
        .returning(|id| Ok(Some(published_product(id, Uuid::new_v4()))));

    let mut reports = MockReportRepository::new();
    reports.expect_already_reported().returning(|_, _| Ok(false));
    reports
        .expect_create()
        .returning(|reporter_id, product_id, reason, description| {
            Ok(ProductReport {
                id: 1,
                reporter_id,
                product_id,
                reason,
                description,
                status: REPORT_STATUS_PENDING.to_string(),
                created_at: Utc::now(),
            })
        });

    let report = report_service(reports, products)
        .file(reporter_id, 5, "counterfeit".to_string(), None)
        .await
        .unwrap();

    assert_eq!(report.status, REPORT_STATUS_PENDING);
    assert_eq!(report.reporter_id, reporter_id);
}
