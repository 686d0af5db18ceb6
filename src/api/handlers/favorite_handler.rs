//! Favorite (wishlist) handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::ProductResponse;
use crate::errors::AppResult;

/// Result of a favorite toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteToggleResponse {
    pub product_id: i32,
    /// Whether the listing is favorited after the toggle
    pub favorited: bool,
}

/// Create favorite routes
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/:product_id", post(toggle_favorite))
}

/// The user's favorited listings
#[utoipa::path(
    get,
    path = "/favorites",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Favorited listings", body = [ProductResponse])
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.services.favorites().list(user.id).await?;
    Ok(Json(products))
}

/// Toggle the favorite mark on a listing
#[utoipa::path(
    post,
    path = "/favorites/{product_id}",
    tag = "Favorites",
    security(("bearer_auth" = [])),
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Toggle result", body = FavoriteToggleResponse),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<FavoriteToggleResponse>> {
    let favorited = state.services.favorites().toggle(user.id, product_id).await?;
    Ok(Json(FavoriteToggleResponse {
        product_id,
        favorited,
    }))
}
