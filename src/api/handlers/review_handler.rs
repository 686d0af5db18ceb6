//! Review handlers.

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::Review;
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// New review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: i32,
    /// Star rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 500, message = "Comment is too long"))]
    pub comment: Option<String>,
}

/// Create review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/:id", delete(delete_review))
}

/// Leave a review on a listing
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Cannot review your own listing"),
        (status = 409, description = "Already reviewed")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<Created<Review>> {
    let review = state
        .services
        .reviews()
        .add(user.id, payload.product_id, payload.rating, payload.comment)
        .await?;
    Ok(Created(review))
}

/// Delete a review (author or admin)
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.reviews().delete(id, user.id, user.role).await?;
    Ok(NoContent)
}
