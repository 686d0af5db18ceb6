//! Admin handlers - user administration, moderation, category management.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Category, ProductReport, UpsertCategory, User, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Role change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRoleRequest {
    /// `user`, `seller`, or `admin`
    #[schema(example = "seller")]
    pub role: String,
}

/// Create admin routes; layered behind the admin gate
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", put(set_role))
        .route("/users/:id", delete(purge_user))
        .route("/reports", get(list_reports))
        .route("/reports/:id", delete(dismiss_report))
        .route("/reports/:id/ban", post(ban_product))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            put(update_category).delete(delete_category),
        )
}

/// List all user accounts
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of users"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let page: Paginated<User> = state.services.admin().list_users(params).await?;
    Ok(Json(page.map(UserResponse::from)))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/admin/users/{id}/role",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserResponse),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "User not found")
    )
)]
pub async fn set_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.admin().set_role(id, payload.role).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user account and everything they own
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User purged"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn purge_user(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.services.admin().purge_user(admin.id, id).await?;
    Ok(NoContent)
}

/// Reports awaiting moderation
#[utoipa::path(
    get,
    path = "/admin/reports",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of pending reports")
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ProductReport>>> {
    let page = state.services.admin().list_reports(params).await?;
    Ok(Json(page))
}

/// Dismiss a report without acting on the listing
#[utoipa::path(
    delete,
    path = "/admin/reports/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Report id")),
    responses(
        (status = 204, description = "Report dismissed"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn dismiss_report(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.admin().dismiss_report(id).await?;
    Ok(NoContent)
}

/// Remove the reported listing and the report that flagged it
#[utoipa::path(
    post,
    path = "/admin/reports/{id}/ban",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Report id")),
    responses(
        (status = 204, description = "Listing removed"),
        (status = 404, description = "Report or listing not found")
    )
)]
pub async fn ban_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.admin().ban_product(id).await?;
    Ok(NoContent)
}

/// Flat category list (admin view)
#[utoipa::path(
    get,
    path = "/admin/categories",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories", body = [Category])
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories().list_all().await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = UpsertCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid parent")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<UpsertCategory>,
) -> AppResult<Created<Category>> {
    let category = state.services.categories().create(payload).await?;
    Ok(Created(category))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpsertCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpsertCategory>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories().update(id, payload).await?;
    Ok(Json(category))
}

/// Delete a category with no children or products
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 409, description = "Category still referenced")
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.categories().delete(id).await?;
    Ok(NoContent)
}
