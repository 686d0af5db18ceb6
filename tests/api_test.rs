//! API surface tests.
//!
//! Endpoint handlers are thin wrappers over the service layer, which is
//! covered by the service tests; these verify the response and error
//! types every handler is built from.

use axum::http::StatusCode;
use axum::response::IntoResponse;

use bendensana::domain::UserRole;
use bendensana::errors::AppError;
use bendensana::types::{ApiResponse, Created, NoContent};

// =============================================================================
// Response envelope
// =============================================================================

#[tokio::test]
async fn api_response_wraps_data() {
    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn api_response_carries_a_message() {
    let response: ApiResponse<i32> = ApiResponse::with_message(42, "Operation completed");
    assert!(response.success);
    assert_eq!(response.data.unwrap(), 42);
    assert_eq!(response.message.unwrap(), "Operation completed");
}

#[tokio::test]
async fn message_only_response_has_no_data() {
    let response: ApiResponse<()> = ApiResponse::message("Success");
    assert!(response.success);
    assert!(response.data.is_none());
}

#[tokio::test]
async fn created_responds_with_201() {
    let response = Created("new thing".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn no_content_responds_with_204() {
    let response = NoContent.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn errors_map_to_http_statuses() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (
            AppError::conflict("You have already reviewed this product"),
            StatusCode::CONFLICT,
        ),
        (AppError::validation("Cart is empty"), StatusCode::BAD_REQUEST),
        (
            AppError::bad_request("You cannot buy your own listing"),
            StatusCode::BAD_REQUEST,
        ),
        (AppError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, status) in cases {
        assert_eq!(error.into_response().status(), status);
    }
}

#[tokio::test]
async fn conflict_messages_reach_the_client_verbatim() {
    // Conflicts describe a state ("Product is no longer available"), not a
    // duplicate entity, so the variant must not decorate the message.
    let error = AppError::conflict("Product is no longer available");
    assert_eq!(error.to_string(), "Product is no longer available");

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["message"], "Product is no longer available");
    assert_eq!(body["error"]["code"], "CONFLICT");
}

// =============================================================================
// Roles
// =============================================================================

#[tokio::test]
async fn roles_round_trip_through_strings() {
    assert_eq!(UserRole::User.to_string(), "user");
    assert_eq!(UserRole::Seller.to_string(), "seller");
    assert_eq!(UserRole::Admin.to_string(), "admin");

    assert_eq!(UserRole::from("seller"), UserRole::Seller);
    assert_eq!(UserRole::from("admin"), UserRole::Admin);
    // Unknown values fall back to the plain user role
    assert_eq!(UserRole::from("invalid"), UserRole::User);
}

#[tokio::test]
async fn admins_satisfy_every_requirement() {
    assert!(UserRole::Admin.can_access(UserRole::Admin));
    assert!(UserRole::Admin.can_access(UserRole::Seller));
    assert!(UserRole::Seller.can_access(UserRole::User));
    assert!(!UserRole::Seller.can_access(UserRole::Admin));
    assert!(!UserRole::User.can_access(UserRole::Seller));
}

#[tokio::test]
async fn admins_can_sell() {
    assert!(UserRole::Admin.is_seller());
    assert!(UserRole::Seller.is_seller());
    assert!(!UserRole::User.is_seller());
}
