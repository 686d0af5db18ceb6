//! Public category and color lookup handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::{CategoryTree, Color};
use crate::errors::AppResult;

/// Public lookup routes
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(category_tree))
        .route("/colors", get(list_colors))
}

/// Category tree: root categories with their direct children
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "Category tree", body = [CategoryTree])
    )
)]
pub async fn category_tree(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryTree>>> {
    let tree = state.services.categories().tree().await?;
    Ok(Json(tree))
}

/// Color lookup values for listing forms
#[utoipa::path(
    get,
    path = "/colors",
    tag = "Catalog",
    responses(
        (status = 200, description = "Available colors", body = [Color])
    )
)]
pub async fn list_colors(State(state): State<AppState>) -> AppResult<Json<Vec<Color>>> {
    let colors = state.services.categories().list_colors().await?;
    Ok(Json(colors))
}
