//! User service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use bendensana::domain::{Password, UpdateProfile};
use bendensana::errors::AppError;
use bendensana::infra::MockUserRepository;
use bendensana::services::{UserManager, UserService};

use common::{test_user, TestUnitOfWork};

fn service(users: MockUserRepository) -> UserManager<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    UserManager::new(Arc::new(uow))
}

#[tokio::test]
async fn get_user_success() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(test_user(id))));

    let result = service(users).get_user(user_id).await;

    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn get_user_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let result = service(users).get_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn update_profile_delegates_to_repository() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_update_profile()
        .with(eq(user_id), mockall::predicate::always())
        .returning(|id, update| {
            let mut user = test_user(id);
            if let Some(first_name) = update.first_name {
                user.first_name = first_name;
            }
            Ok(user)
        });

    let update = UpdateProfile {
        first_name: Some("Jane".to_string()),
        last_name: None,
        phone: None,
        profile_image_url: None,
    };
    let user = service(users).update_profile(user_id, update).await.unwrap();

    assert_eq!(user.first_name, "Jane");
}

#[tokio::test]
async fn change_password_rejects_wrong_current_password() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|id| {
        let mut user = test_user(id);
        user.password_hash = Password::new("the real password").unwrap().into_string();
        Ok(Some(user))
    });

    let result = service(users)
        .change_password(
            user_id,
            "wrong password".to_string(),
            "new password 123".to_string(),
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn change_password_stores_a_new_hash() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|id| {
        let mut user = test_user(id);
        user.password_hash = Password::new("the real password").unwrap().into_string();
        Ok(Some(user))
    });
    users
        .expect_update_password()
        .withf(|_, hash| hash.starts_with("$argon2"))
        .returning(|_, _| Ok(()));

    let result = service(users)
        .change_password(
            user_id,
            "the real password".to_string(),
            "new password 123".to_string(),
        )
        .await;

    assert!(result.is_ok());
}
