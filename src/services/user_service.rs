//! User service - Profile and password management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Password, UpdateProfile, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Update the user's own profile fields
    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> AppResult<User>;

    /// Change password after verifying the current one
    async fn change_password(
        &self,
        id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> AppResult<User> {
        self.uow.users().update_profile(id, update).await
    }

    async fn change_password(
        &self,
        id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let stored = Password::from_hash(user.password_hash);
        if !stored.verify(&current_password) {
            return Err(AppError::InvalidCredentials);
        }

        let new_hash = Password::new(&new_password)?.into_string();
        self.uow.users().update_password(id, new_hash).await
    }
}
