//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_SELLER, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Seller,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role can act as a seller
    pub fn is_seller(&self) -> bool {
        matches!(self, UserRole::Seller | UserRole::Admin)
    }

    /// Check if this role satisfies a required role.
    /// Admins satisfy every requirement.
    pub fn can_access(&self, required: UserRole) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Seller => !matches!(required, UserRole::Admin),
            UserRole::User => matches!(required, UserRole::User),
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_SELLER => UserRole::Seller,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Seller => write!(f, "{}", ROLE_SELLER),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Profile update data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProfile {
    /// New first name
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    /// New last name
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New profile image URL
    pub profile_image_url: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// First name
    #[schema(example = "John")]
    pub first_name: String,
    /// Last name
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Phone number
    pub phone: Option<String>,
    /// Profile image URL
    pub profile_image_url: Option<String>,
    /// User role
    #[schema(example = "user")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            profile_image_url: user.profile_image_url,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [UserRole::User, UserRole::Seller, UserRole::Admin] {
            assert_eq!(UserRole::from(role.to_string().as_str()), role);
        }
    }

    #[test]
    fn unknown_role_string_defaults_to_user() {
        assert_eq!(UserRole::from("moderator"), UserRole::User);
    }

    #[test]
    fn admin_can_access_everything() {
        assert!(UserRole::Admin.can_access(UserRole::User));
        assert!(UserRole::Admin.can_access(UserRole::Seller));
        assert!(UserRole::Admin.can_access(UserRole::Admin));
    }

    #[test]
    fn user_cannot_access_seller_routes() {
        assert!(!UserRole::User.can_access(UserRole::Seller));
        assert!(!UserRole::Seller.can_access(UserRole::Admin));
    }
}
