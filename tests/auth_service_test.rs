//! Auth service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use bendensana::config::Config;
use bendensana::domain::{Password, User};
use bendensana::errors::AppError;
use bendensana::infra::MockUserRepository;
use bendensana::services::{AuthService, Authenticator, Registration};

use common::{test_user, TestUnitOfWork};

fn registration() -> Registration {
    Registration {
        email: "new@example.com".to_string(),
        password: "correct horse battery".to_string(),
        first_name: "New".to_string(),
        last_name: "User".to_string(),
    }
}

fn service(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    Authenticator::new(Arc::new(uow), Config::from_env())
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_email_exists()
        .with(eq("new@example.com"))
        .returning(|_| Ok(true));

    let result = service(users).register(registration()).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn register_stores_a_hash_not_the_password() {
    let mut users = MockUserRepository::new();
    users.expect_email_exists().returning(|_| Ok(false));
    users.expect_create().returning(|new_user| {
        assert_ne!(new_user.password_hash, "correct horse battery");
        assert!(new_user.password_hash.starts_with("$argon2"));
        let mut user = test_user(Uuid::new_v4());
        user.email = new_user.email;
        user.password_hash = new_user.password_hash;
        user.first_name = new_user.first_name;
        user.last_name = new_user.last_name;
        Ok(user)
    });

    let user = service(users).register(registration()).await.unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.first_name, "New");
}

fn user_with_password(password: &str) -> User {
    let mut user = test_user(Uuid::new_v4());
    user.password_hash = Password::new(password).unwrap().into_string();
    user
}

#[tokio::test]
async fn login_issues_a_verifiable_token() {
    let user = user_with_password("hunter2hunter2");
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .with(eq("test@example.com"))
        .returning(move |_| Ok(Some(user.clone())));

    let service = service(users);
    let token = service
        .login("test@example.com".to_string(), "hunter2hunter2".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");
    assert!(token.expires_in > 0);

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "test@example.com");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let user = user_with_password("hunter2hunter2");

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(user.clone())));

    let result = service(users)
        .login("test@example.com".to_string(), "not the password".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));

    let result = service(users)
        .login("nobody@example.com".to_string(), "whatever123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let result = service(MockUserRepository::new()).verify_token("not.a.jwt");
    assert!(result.is_err());
}
