//! Shopping cart handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::CartView;

/// Add-to-cart request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i32,
    /// Requested quantity, clamped into the allowed range
    #[validate(range(min = 1, max = 10, message = "Quantity must be between 1 and 10"))]
    pub quantity: i32,
}

/// Quantity update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuantityRequest {
    #[validate(range(min = 1, max = 10, message = "Quantity must be between 1 and 10"))]
    pub quantity: i32,
}

/// Create cart routes
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart))
        .route("/items", post(add_item))
        .route("/items/:id", put(update_quantity).delete(remove_item))
}

/// View the cart with a running subtotal
#[utoipa::path(
    get,
    path = "/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents", body = CartView)
    )
)]
pub async fn view_cart(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CartView>> {
    let cart = state.services.carts().view(user.id).await?;
    Ok(Json(cart))
}

/// Add a product to the cart
#[utoipa::path(
    post,
    path = "/cart/items",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartView),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product is no longer available")
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<AddToCartRequest>,
) -> AppResult<Json<CartView>> {
    let cart = state
        .services
        .carts()
        .add(user.id, payload.product_id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// Change the quantity of a cart line
#[utoipa::path(
    put,
    path = "/cart/items/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Cart item id")),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartView),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateQuantityRequest>,
) -> AppResult<Json<CartView>> {
    let cart = state
        .services
        .carts()
        .update_quantity(user.id, id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// Remove a line from the cart
#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Updated cart", body = CartView),
        (status = 404, description = "Item not found")
    )
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<CartView>> {
    let cart = state.services.carts().remove(user.id, id).await?;
    Ok(Json(cart))
}
