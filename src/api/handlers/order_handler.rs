//! Checkout and order handlers, buyer and seller side.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Order, OrderStatus};
use crate::errors::AppResult;
use crate::services::{CheckoutRequest, OrderDetail};
use crate::types::{Created, Paginated, PaginationParams};

/// Order status update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Buyer-side order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout).get(list_orders))
        .route("/:id", get(get_order))
}

/// Seller-side order routes
pub fn seller_order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(seller_orders))
        .route("/orders/:id/status", put(update_order_status))
}

/// Place an order from the cart
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderDetail),
        (status = 400, description = "Cart empty or address missing"),
        (status = 409, description = "A product is no longer available")
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Created<OrderDetail>> {
    let order = state.services.orders().checkout(user.id, payload).await?;
    Ok(Created(order))
}

/// The buyer's order history
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of orders")
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Order>>> {
    let page = state.services.orders().list_for_buyer(user.id, params).await?;
    Ok(Json(page))
}

/// One order with its lines
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = OrderDetail),
        (status = 403, description = "Not a party to this order"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<OrderDetail>> {
    let order = state
        .services
        .orders()
        .get_order(id, user.id, user.role)
        .await?;
    Ok(Json(order))
}

/// Orders containing the seller's listings
#[utoipa::path(
    get,
    path = "/seller/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of orders to fulfil")
    )
)]
pub async fn seller_orders(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Order>>> {
    let page = state
        .services
        .orders()
        .list_for_seller(user.id, params)
        .await?;
    Ok(Json(page))
}

/// Move an order along its lifecycle
#[utoipa::path(
    put,
    path = "/seller/orders/{id}/status",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order updated"),
        (status = 403, description = "No lines in this order"),
        (status = 409, description = "Illegal status transition")
    )
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<Order>> {
    let order = state
        .services
        .orders()
        .update_status(id, user.id, user.role, payload.status)
        .await?;
    Ok(Json(order))
}
