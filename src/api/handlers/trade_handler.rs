//! Trade (barter) offer handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateTradeOffer, TradeDecision, TradeOffer};
use crate::errors::{AppError, AppResult};
use crate::services::TradeDetail;
use crate::types::{Created, Paginated, PaginationParams};

/// Decision on a pending offer
#[derive(Debug, Deserialize, ToSchema)]
pub struct TradeDecisionRequest {
    /// `accept`, `reject`, or `cancel`
    #[schema(example = "accept")]
    pub decision: String,
}

impl TradeDecisionRequest {
    fn parse(&self) -> AppResult<TradeDecision> {
        match self.decision.as_str() {
            "accept" => Ok(TradeDecision::Accept),
            "reject" => Ok(TradeDecision::Reject),
            "cancel" => Ok(TradeDecision::Cancel),
            other => Err(AppError::validation(format!(
                "Unknown decision '{}'",
                other
            ))),
        }
    }
}

/// Create trade routes
pub fn trade_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_offer).get(list_offers))
        .route("/:id", get(get_offer))
        .route("/:id/decision", post(decide))
}

/// Make a trade offer on another user's listing
#[utoipa::path(
    post,
    path = "/trades",
    tag = "Trades",
    security(("bearer_auth" = [])),
    request_body = CreateTradeOffer,
    responses(
        (status = 201, description = "Offer created", body = TradeDetail),
        (status = 400, description = "No products or cash offered"),
        (status = 409, description = "A product is no longer available")
    )
)]
pub async fn create_offer(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateTradeOffer>,
) -> AppResult<Created<TradeDetail>> {
    let offer = state.services.trades().create_offer(user.id, payload).await?;
    Ok(Created(offer))
}

/// Offers the user made or received
#[utoipa::path(
    get,
    path = "/trades",
    tag = "Trades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of trade offers")
    )
)]
pub async fn list_offers(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<TradeOffer>>> {
    let page = state.services.trades().list_for_user(user.id, params).await?;
    Ok(Json(page))
}

/// One offer with its items
#[utoipa::path(
    get,
    path = "/trades/{id}",
    tag = "Trades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trade offer id")),
    responses(
        (status = 200, description = "Offer detail", body = TradeDetail),
        (status = 403, description = "Not a party to this offer"),
        (status = 404, description = "Offer not found")
    )
)]
pub async fn get_offer(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<TradeDetail>> {
    let offer = state.services.trades().get_offer(id, user.id).await?;
    Ok(Json(offer))
}

/// Accept, reject, or cancel a pending offer
#[utoipa::path(
    post,
    path = "/trades/{id}/decision",
    tag = "Trades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Trade offer id")),
    request_body = TradeDecisionRequest,
    responses(
        (status = 200, description = "Offer settled"),
        (status = 400, description = "Offer already settled"),
        (status = 403, description = "This decision is not yours to make")
    )
)]
pub async fn decide(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<TradeDecisionRequest>,
) -> AppResult<Json<TradeOffer>> {
    let decision = payload.parse()?;
    let offer = state.services.trades().decide(id, user.id, decision).await?;
    Ok(Json(offer))
}
