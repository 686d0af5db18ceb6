//! Admin service unit tests.
//!
//! Purging a user and banning a product run inside a transaction and
//! are covered by integration against a real database; these tests
//! exercise the guards in front of them.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use bendensana::domain::{ProductReport, UserRole};
use bendensana::errors::AppError;
use bendensana::infra::{MockReportRepository, MockUserRepository};
use bendensana::services::{AdminManager, AdminService};

use common::{test_user, TestUnitOfWork};

#[tokio::test]
async fn set_role_rejects_unknown_roles() {
    let uow = TestUnitOfWork::default();
    let result = AdminManager::new(Arc::new(uow))
        .set_role(Uuid::new_v4(), "superuser".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn set_role_promotes_to_seller() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_update_role()
        .with(eq(user_id), eq("seller".to_string()))
        .returning(|id, role| {
            let mut user = test_user(id);
            user.role = UserRole::from(role.as_str());
            Ok(user)
        });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let user = AdminManager::new(Arc::new(uow))
        .set_role(user_id, "seller".to_string())
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::Seller);
}

#[tokio::test]
async fn admins_cannot_purge_themselves() {
    let admin_id = Uuid::new_v4();

    let uow = TestUnitOfWork::default();
    let result = AdminManager::new(Arc::new(uow))
        .purge_user(admin_id, admin_id)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn dismissing_a_report_deletes_it() {
    let mut reports = MockReportRepository::new();
    reports.expect_delete().with(eq(3)).returning(|_| Ok(()));

    let uow = TestUnitOfWork {
        reports: Arc::new(reports),
        ..Default::default()
    };
    let result = AdminManager::new(Arc::new(uow)).dismiss_report(3).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn banning_an_unknown_report_is_not_found() {
    let mut reports = MockReportRepository::new();
    reports.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        reports: Arc::new(reports),
        ..Default::default()
    };
    let result = AdminManager::new(Arc::new(uow)).ban_product(3).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn pending_reports_are_listed() {
    let mut reports = MockReportRepository::new();
    reports.expect_list_pending().returning(|params| {
        let data = vec![ProductReport {
            id: 1,
            reporter_id: Uuid::new_v4(),
            product_id: 5,
            reason: "counterfeit".to_string(),
            description: None,
            status: "pending".to_string(),
            created_at: Utc::now(),
        }];
        Ok(bendensana::types::Paginated::new(data, params.page, params.limit(), 1))
    });

    let uow = TestUnitOfWork {
        reports: Arc::new(reports),
        ..Default::default()
    };
    let page = AdminManager::new(Arc::new(uow))
        .list_reports(Default::default())
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
}
