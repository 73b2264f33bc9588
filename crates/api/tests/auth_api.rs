//! HTTP-level tests for login, token refresh, logout and password changes.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_admin, get, get_auth, login, post_json, post_json_auth,
    ADMIN_PASSWORD,
};
use greenhomes_db::repositories::AdminUserRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_returns_profile_and_tokens(pool: PgPool) {
    let admin = create_admin(&pool, "owner@hsrgreenhomes.test").await;
    let app = common::build_test_app(pool);

    let data = login(app.router(), "owner@hsrgreenhomes.test", ADMIN_PASSWORD).await;

    assert_eq!(data["user"]["id"], admin.id);
    assert_eq!(data["user"]["email"], "owner@hsrgreenhomes.test");
    assert_eq!(data["user"]["role"], "Super Admin");
    assert!(data["user"].get("password_hash").is_none());
    assert!(data["tokens"]["access"].is_string());
    assert!(data["tokens"]["refresh"].is_string());
    assert!(data["user"]["last_login"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_wrong_password_is_401(pool: PgPool) {
    create_admin(&pool, "owner@hsrgreenhomes.test").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/v1/auth/login",
        json!({ "email": "owner@hsrgreenhomes.test", "password": "nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid email or password");
    assert_eq!(json["data"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_malformed_email_reports_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/v1/auth/login",
        json!({ "email": "not-an-email", "password": "whatever" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["email"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_admin_cannot_log_in(pool: PgPool) {
    let admin = create_admin(&pool, "gone@hsrgreenhomes.test").await;
    AdminUserRepo::set_active(&pool, admin.id, false).await.unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/v1/auth/login",
        json!({ "email": "gone@hsrgreenhomes.test", "password": ADMIN_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_the_refresh_token(pool: PgPool) {
    create_admin(&pool, "owner@hsrgreenhomes.test").await;
    let app = common::build_test_app(pool);
    let data = login(app.router(), "owner@hsrgreenhomes.test", ADMIN_PASSWORD).await;
    let refresh = data["tokens"]["refresh"].as_str().unwrap().to_string();

    let response = post_json(
        app.router(),
        "/api/v1/auth/refresh",
        json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["data"]["refresh"].as_str().unwrap(), refresh);

    // The old token was revoked by the rotation.
    let replay = post_json(
        app.router(),
        "/api/v1/auth/refresh",
        json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_without_token_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.router(), "/api/v1/auth/refresh", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_the_refresh_token(pool: PgPool) {
    create_admin(&pool, "owner@hsrgreenhomes.test").await;
    let app = common::build_test_app(pool);
    let data = login(app.router(), "owner@hsrgreenhomes.test", ADMIN_PASSWORD).await;
    let access = data["tokens"]["access"].as_str().unwrap();
    let refresh = data["tokens"]["refresh"].as_str().unwrap();

    let response = post_json_auth(
        app.router(),
        "/api/v1/auth/logout",
        json!({ "refresh": refresh }),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Logout successful");

    let response = post_json(
        app.router(),
        "/api/v1/auth/refresh",
        json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_a_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = get(app.router(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.router(), "/api/v1/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = admin_token(&pool, app.router()).await;
    let response = get_auth(app.router(), "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["email"],
        "admin@hsrgreenhomes.test"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password_validates_and_revokes_sessions(pool: PgPool) {
    create_admin(&pool, "owner@hsrgreenhomes.test").await;
    let app = common::build_test_app(pool);
    let data = login(app.router(), "owner@hsrgreenhomes.test", ADMIN_PASSWORD).await;
    let access = data["tokens"]["access"].as_str().unwrap();
    let refresh = data["tokens"]["refresh"].as_str().unwrap();

    let response = post_json_auth(
        app.router(),
        "/api/v1/auth/change-password",
        json!({
            "old_password": "wrong",
            "new_password": "weak",
            "confirm_password": "different",
        }),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["old_password"].is_array());
    assert!(json["errors"]["new_password"].is_array());
    assert!(json["errors"]["confirm_password"].is_array());

    let response = post_json_auth(
        app.router(),
        "/api/v1/auth/change-password",
        json!({
            "old_password": ADMIN_PASSWORD,
            "new_password": "N3w!Passw0rd",
            "confirm_password": "N3w!Passw0rd",
        }),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        app.router(),
        "/api/v1/auth/refresh",
        json!({ "refresh": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login(app.router(), "owner@hsrgreenhomes.test", "N3w!Passw0rd").await;
}
