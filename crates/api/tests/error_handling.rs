//! Tests for `AppError` to envelope mapping.
//!
//! Most of these call `IntoResponse` directly; the router-level cases at the
//! bottom go through the full middleware stack.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use common::{body_json, get};
use greenhomes_api::error::{envelope_bare_errors, panic_response, AppError};
use greenhomes_core::error::CoreError;
use greenhomes_core::validation::FieldErrors;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_not_found_uses_the_entity_name() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Project not found");
    assert_eq!(json["data"], serde_json::Value::Null);
    assert_eq!(json["errors"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_field_errors_are_keyed_by_field() {
    let mut errors = FieldErrors::new();
    errors.add("email", "Enter a valid email address.");
    errors.add("phone", "Invalid phone number format.");

    let (status, json) = error_to_response(errors.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["errors"]["email"][0], "Enter a valid email address.");
    assert_eq!(json["errors"]["phone"][0], "Invalid phone number format.");
}

#[tokio::test]
async fn test_validation_message_is_surfaced() {
    let err = AppError::Core(CoreError::Validation("Lead is not deleted".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Lead is not deleted");
    assert_eq!(json["errors"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_conflict_returns_409() {
    let err = AppError::Core(CoreError::Conflict("RERA number in use".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["errors"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_auth_failures_map_to_401_and_403() {
    let (status, _) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no token".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        error_to_response(AppError::Core(CoreError::Forbidden("not admin".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_internal_errors_are_sanitized() {
    let err = AppError::InternalError("connection string leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
    assert!(!json.to_string().contains("connection string"));
}

#[tokio::test]
async fn test_row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_panic_payload_is_not_leaked() {
    let response = panic_response(Box::new(String::from("secret token in panic")));
    let status = response.status();
    let json = body_json(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "An internal error occurred");
    assert!(!json.to_string().contains("secret token"));
}

#[tokio::test]
async fn test_bare_timeout_gets_an_envelope() {
    let bare = Response::builder()
        .status(StatusCode::REQUEST_TIMEOUT)
        .body(Body::empty())
        .unwrap();

    let response = envelope_bare_errors(bare).await;
    let status = response.status();
    let json = body_json(response).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Request timed out");
    assert_eq!(json["errors"]["code"], "TIMEOUT");
}

#[tokio::test]
async fn test_bare_client_error_keeps_its_status() {
    let bare = Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .body(Body::empty())
        .unwrap();

    let response = envelope_bare_errors(bare).await;
    let status = response.status();
    let json = body_json(response).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["message"], "Payload Too Large");
}

#[tokio::test]
async fn test_json_error_responses_pass_through_untouched() {
    let original = AppError::BadRequest("Refresh token is required".into()).into_response();

    let response = envelope_bare_errors(original).await;
    let json = body_json(response).await;

    assert_eq!(json["message"], "Refresh token is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/api/v1/no-such-thing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Endpoint not found");
    assert_eq!(json["data"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unsupported_method_returns_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/auth/login")
        .body(Body::empty())
        .unwrap();
    let response = app.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"]["code"], "METHOD_NOT_ALLOWED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_media_file_returns_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/media/uploads/missing.png").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}
