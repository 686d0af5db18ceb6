//! Product report handlers.

use axum::{extract::State, routing::post, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::ProductReport;
use crate::errors::AppResult;
use crate::types::Created;

/// New report request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    pub product_id: i32,
    #[validate(length(min = 1, max = 100, message = "A reason is required"))]
    #[schema(example = "counterfeit")]
    pub reason: String,
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
}

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/", post(create_report))
}

/// Flag a listing for moderation
#[utoipa::path(
    post,
    path = "/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report filed", body = ProductReport),
        (status = 400, description = "Cannot report your own listing"),
        (status = 409, description = "Already reported")
    )
)]
pub async fn create_report(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateReportRequest>,
) -> AppResult<Created<ProductReport>> {
    let report = state
        .services
        .reports()
        .file(
            user.id,
            payload.product_id,
            payload.reason,
            payload.description,
        )
        .await?;
    Ok(Created(report))
}
