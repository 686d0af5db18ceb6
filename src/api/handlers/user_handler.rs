//! Current user profile handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{UpdateProfile, UserResponse};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(length(max = 30, message = "Phone number is too long"))]
    pub phone: Option<String>,
    #[validate(url(message = "Profile image must be a valid URL"))]
    pub profile_image_url: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Create current-user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(me).put(update_me))
        .route("/password", put(change_password))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users().get_user(user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/me",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let update = UpdateProfile {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        profile_image_url: payload.profile_image_url,
    };

    let user = state.services.users().update_profile(user.id, update).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/me/password",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Current password is wrong")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .users()
        .change_password(user.id, payload.current_password, payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed")))
}
