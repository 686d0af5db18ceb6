//! Address and payment card handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Address, CardResponse, UpsertAddress, UpsertCard};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, NoContent};

/// Create profile routes (addresses and cards)
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/addresses", get(list_addresses).post(create_address))
        .route("/addresses/:id", put(update_address).delete(delete_address))
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/:id", axum::routing::delete(delete_card))
        .route("/cards/:id/default", post(set_default_card))
}

/// The user's saved addresses
#[utoipa::path(
    get,
    path = "/profile/addresses",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved addresses", body = [Address])
    )
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Address>>> {
    let addresses = state.services.profiles().list_addresses(user.id).await?;
    Ok(Json(addresses))
}

/// Save a new address
#[utoipa::path(
    post,
    path = "/profile/addresses",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpsertAddress,
    responses(
        (status = 201, description = "Address saved", body = Address)
    )
)]
pub async fn create_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpsertAddress>,
) -> AppResult<Created<Address>> {
    let address = state
        .services
        .profiles()
        .create_address(user.id, payload)
        .await?;
    Ok(Created(address))
}

/// Update a saved address
#[utoipa::path(
    put,
    path = "/profile/addresses/{id}",
    tag = "Profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Address id")),
    request_body = UpsertAddress,
    responses(
        (status = 200, description = "Address updated", body = Address),
        (status = 403, description = "Not your address"),
        (status = 404, description = "Address not found")
    )
)]
pub async fn update_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpsertAddress>,
) -> AppResult<Json<Address>> {
    let address = state
        .services
        .profiles()
        .update_address(user.id, id, payload)
        .await?;
    Ok(Json(address))
}

/// Delete a saved address
#[utoipa::path(
    delete,
    path = "/profile/addresses/{id}",
    tag = "Profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 404, description = "Address not found")
    )
)]
pub async fn delete_address(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.profiles().delete_address(user.id, id).await?;
    Ok(NoContent)
}

/// The user's saved cards, numbers masked
#[utoipa::path(
    get,
    path = "/profile/cards",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved cards", body = [CardResponse])
    )
)]
pub async fn list_cards(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<CardResponse>>> {
    let cards = state.services.profiles().list_cards(user.id).await?;
    Ok(Json(cards))
}

/// Save a new card
#[utoipa::path(
    post,
    path = "/profile/cards",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpsertCard,
    responses(
        (status = 201, description = "Card saved", body = CardResponse)
    )
)]
pub async fn create_card(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpsertCard>,
) -> AppResult<Created<CardResponse>> {
    let card = state.services.profiles().create_card(user.id, payload).await?;
    Ok(Created(card))
}

/// Delete a saved card
#[utoipa::path(
    delete,
    path = "/profile/cards/{id}",
    tag = "Profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card id")),
    responses(
        (status = 204, description = "Card deleted"),
        (status = 404, description = "Card not found")
    )
)]
pub async fn delete_card(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.profiles().delete_card(user.id, id).await?;
    Ok(NoContent)
}

/// Make a card the default
#[utoipa::path(
    post,
    path = "/profile/cards/{id}/default",
    tag = "Profile",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Card id")),
    responses(
        (status = 200, description = "Default card set"),
        (status = 404, description = "Card not found")
    )
)]
pub async fn set_default_card(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .profiles()
        .set_default_card(user.id, id)
        .await?;
    Ok(Json(MessageResponse::new("Default card set")))
}
