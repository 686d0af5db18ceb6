//! Buyer/seller messaging handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Conversation, Message};
use crate::errors::AppResult;
use crate::types::Created;

/// Start-conversation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartConversationRequest {
    pub product_id: i32,
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

/// Send-message request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

/// Create conversation routes
pub fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(start_conversation).get(list_conversations))
        .route("/:id/messages", get(list_messages).post(send_message))
}

/// Message a seller about a listing
#[utoipa::path(
    post,
    path = "/conversations",
    tag = "Conversations",
    security(("bearer_auth" = [])),
    request_body = StartConversationRequest,
    responses(
        (status = 201, description = "Conversation started"),
        (status = 400, description = "Cannot message yourself"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn start_conversation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<StartConversationRequest>,
) -> AppResult<Created<Conversation>> {
    let thread = state
        .services
        .conversations()
        .start(user.id, payload.product_id, payload.message)
        .await?;
    Ok(Created(thread))
}

/// Threads the user takes part in
#[utoipa::path(
    get,
    path = "/conversations",
    tag = "Conversations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Threads, most recently active first")
    )
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Conversation>>> {
    let threads = state.services.conversations().list_for_user(user.id).await?;
    Ok(Json(threads))
}

/// Messages in a thread; reading marks the other side's messages read
#[utoipa::path(
    get,
    path = "/conversations/{id}/messages",
    tag = "Conversations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Messages in order", body = [Message]),
        (status = 403, description = "Not a participant")
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Message>>> {
    let messages = state.services.conversations().messages(id, user.id).await?;
    Ok(Json(messages))
}

/// Send a message into a thread
#[utoipa::path(
    post,
    path = "/conversations/{id}/messages",
    tag = "Conversations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Conversation id")),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = Message),
        (status = 403, description = "Not a participant")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SendMessageRequest>,
) -> AppResult<Created<Message>> {
    let message = state
        .services
        .conversations()
        .send(id, user.id, payload.content)
        .await?;
    Ok(Created(message))
}
