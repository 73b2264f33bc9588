//! HTTP-level tests for the homepage content and featured projects.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, get, post_json_auth, project_body, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_complete_homepage_has_seeded_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/api/v1/homepage").await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["hero"]["hero_title"], "Building Dreams, Creating Homes");
    assert_eq!(data["featured_projects"], json!([]));
    assert_eq!(data["testimonials"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hero_update_leaves_other_sections_alone(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;

    let before = body_json(get(app.router(), "/api/v1/homepage/statistics").await).await;

    let response = put_json_auth(
        app.router(),
        "/api/v1/homepage/hero",
        json!({ "hero_title": "Homes that breathe" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["hero_title"],
        "Homes that breathe"
    );

    let after = body_json(get(app.router(), "/api/v1/homepage/statistics").await).await;
    assert_eq!(before["data"], after["data"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_footer_contact_fields_are_validated(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;

    let response = put_json_auth(
        app.router(),
        "/api/v1/homepage/footer",
        json!({ "footer_email": "not-an-email", "footer_phone_number": "abc" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["footer_email"].is_array());
    assert!(json["errors"]["footer_phone_number"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_updates_require_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.router(),
        "/api/v1/homepage/content",
        json!({ "hero_title": "x" }),
        "not-a-token",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_project_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let response = post_json_auth(
        app.router(),
        "/api/v1/projects",
        project_body("Green Meadows", "RERA-1"),
        &token,
    )
    .await;
    let project_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.router(),
        "/api/v1/homepage/featured-projects",
        json!({ "project_id": project_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = body_json(response).await["data"].clone();
    assert_eq!(entry["project_title"], "Green Meadows");
    let entry_id = entry["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.router(),
        "/api/v1/homepage/featured-projects",
        json!({ "project_id": project_id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["project_id"].is_array());

    let response = get(app.router(), "/api/v1/homepage").await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["featured_projects"][0]["project_id"], project_id);

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/homepage/featured-projects/{entry_id}"),
        json!({ "is_active": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        app.router(),
        &format!("/api/v1/homepage/featured-projects/{entry_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(
        app.router(),
        &format!("/api/v1/homepage/featured-projects/{entry_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_homepage_testimonials_respect_limit(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    for name in ["Meera Iyer", "Ravi Kumar", "Anita Desai"] {
        post_json_auth(
            app.router(),
            "/api/v1/testimonials",
            json!({ "customer_name": name, "quote": "Lovely community and great build quality." }),
            &token,
        )
        .await;
    }

    let response = get(app.router(), "/api/v1/homepage/testimonials?limit=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}
