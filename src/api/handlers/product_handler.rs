//! Product catalog and listing management handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateProduct, ProductResponse, Review};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Catalog filter query
#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogQuery {
    /// Restrict to one category
    pub category_id: Option<i32>,
}

/// Public catalog routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/:id/reviews", get(product_reviews))
}

/// Authenticated listing management routes
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_listing))
        .route("/mine", get(my_listings))
        .route("/:id", delete(delete_listing))
}

/// Browse published listings
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Page of published listings")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<CatalogQuery>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ProductResponse>>> {
    let page = state
        .services
        .products()
        .list_published(filter.category_id, params)
        .await?;
    Ok(Json(page))
}

/// Get one listing with its images
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Listing detail", body = ProductResponse),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products().get_product(id).await?;
    Ok(Json(product))
}

/// Reviews left on a listing
#[utoipa::path(
    get,
    path = "/products/{id}/reviews",
    tag = "Catalog",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Reviews for the listing", body = [Review])
    )
)]
pub async fn product_reviews(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.services.reviews().list_for_product(id).await?;
    Ok(Json(reviews))
}

/// Create a listing (sellers only)
#[utoipa::path(
    post,
    path = "/listings",
    tag = "Listings",
    security(("bearer_auth" = [])),
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Listing created", body = ProductResponse),
        (status = 403, description = "Seller role required")
    )
)]
pub async fn create_listing(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateProduct>,
) -> AppResult<Created<ProductResponse>> {
    let product = state
        .services
        .products()
        .create_listing(user.id, user.role, payload)
        .await?;
    Ok(Created(product))
}

/// The seller's own listings, any status
#[utoipa::path(
    get,
    path = "/listings/mine",
    tag = "Listings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of own listings")
    )
)]
pub async fn my_listings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ProductResponse>>> {
    let page = state.services.products().my_listings(user.id, params).await?;
    Ok(Json(page))
}

/// Delete a listing (owner or admin)
#[utoipa::path(
    delete,
    path = "/listings/{id}",
    tag = "Listings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .services
        .products()
        .delete_listing(id, user.id, user.role)
        .await?;
    Ok(NoContent)
}
