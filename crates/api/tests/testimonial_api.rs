//! HTTP-level tests for testimonials.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create_testimonial(app: axum::Router, token: &str, name: &str, active: bool) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/testimonials",
        json!({
            "customer_name": name,
            "quote": "Wonderful experience buying our first home here.",
            "rating": 5,
            "is_active": active,
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_shows_only_active(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    create_testimonial(app.router(), &token, "Meera Iyer", true).await;
    create_testimonial(app.router(), &token, "Ravi Kumar", false).await;

    let response = get(app.router(), "/api/v1/testimonials?is_active=false").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["pagination"]["total"], 1);
    assert_eq!(json["data"]["testimonials"][0]["customer_name"], "Meera Iyer");

    let response = get_auth(app.router(), "/api/v1/testimonials", &token).await;
    assert_eq!(body_json(response).await["data"]["pagination"]["total"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_testimonial_is_hidden_from_public_detail(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = create_testimonial(app.router(), &token, "Ravi Kumar", false).await;

    let response = get(app.router(), &format!("/api/v1/testimonials/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.router(), &format!("/api/v1/testimonials/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_out_of_range_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = create_testimonial(app.router(), &token, "Meera Iyer", true).await;

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/testimonials/{id}"),
        json!({ "rating": 6 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["rating"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_restore_and_bulk_verify(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let a = create_testimonial(app.router(), &token, "Meera Iyer", true).await;
    let b = create_testimonial(app.router(), &token, "Ravi Kumar", true).await;

    let response = delete_auth(app.router(), &format!("/api/v1/testimonials/{a}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/testimonials/{a}/restore"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_deleted"], false);

    let response = post_json_auth(
        app.router(),
        "/api/v1/testimonials/bulk-action",
        json!({ "testimonial_ids": [a, b], "action": "verify" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["updated_count"], 2);

    let response = get(app.router(), "/api/v1/testimonials?verified=true").await;
    assert_eq!(body_json(response).await["data"]["pagination"]["total"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_bulk_action_is_a_field_error(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/testimonials/bulk-action",
        json!({ "testimonial_ids": [1], "action": "promote" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["action"].is_array());
}
