//! HTTP-level tests for the lead pipeline: public submission, admin
//! listing, status workflow, notes and bulk actions.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, delete_auth, get, get_auth, lead_body, patch_json_auth, post_json,
    post_json_auth, project_body,
};
use serde_json::json;
use sqlx::PgPool;

async fn submit_lead(app: axum::Router, name: &str) -> i64 {
    let response = post_json(app, "/api/v1/leads", lead_body(name)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_submission_creates_a_new_lead(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.router(), "/api/v1/leads", lead_body("Asha Rao")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(
        json["message"],
        "Thank you for your interest! We will contact you soon."
    );
    assert_eq!(json["data"]["status"], "new");
    assert_eq!(json["data"]["priority"], "medium");
    assert_eq!(json["data"]["follow_up_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_submission_lists_every_bad_field(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/v1/leads",
        json!({
            "name": "A",
            "email": "nope",
            "phone": "call me",
            "message": "short",
            "project_id": 999_999,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    for field in ["name", "email", "phone", "message", "project_id"] {
        assert!(json["errors"][field].is_array(), "missing error for {field}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/api/v1/leads").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_huge_page_number_returns_an_empty_page(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    submit_lead(app.router(), "Meera Iyer").await;

    let response = get_auth(
        app.router(),
        "/api/v1/leads?page=9223372036854775807",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["leads"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["pagination"]["total"], 1);
    assert_eq!(json["data"]["pagination"]["has_next"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_list_includes_display_fields_and_pagination(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    submit_lead(app.router(), "Asha Rao").await;
    submit_lead(app.router(), "Vikram Shah").await;

    let response = get_auth(app.router(), "/api/v1/leads?search=vikram", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let leads = json["data"]["leads"].as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], "Vikram Shah");
    assert!(leads[0]["status_color"].is_string());
    assert!(leads[0]["time_ago"].is_string());
    assert_eq!(leads[0]["is_overdue"], false);
    assert_eq!(json["data"]["pagination"]["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_moving_to_contacted_records_the_contact(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = submit_lead(app.router(), "Asha Rao").await;

    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}/status"),
        json!({ "status": "contacted", "notes": "Called, interested in 3BHK" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Lead status updated from 'new' to 'contacted'"
    );
    let lead = &json["data"];
    assert_eq!(lead["status"], "contacted");
    assert_eq!(lead["follow_up_count"], 1);
    assert!(lead["contacted_at"].is_string());
    assert!(lead["contacted_by"].is_number());
    assert!(lead["notes"]
        .as_str()
        .unwrap()
        .contains("Called, interested in 3BHK"));

    // Re-entering the same status does not count again.
    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}/status"),
        json!({ "status": "contacted" }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["follow_up_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_change_rejects_unknown_status_and_past_follow_up(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = submit_lead(app.router(), "Asha Rao").await;

    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}/status"),
        json!({ "status": "archived", "next_follow_up": "2001-01-01T00:00:00Z" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["status"].is_array());
    assert!(json["errors"]["next_follow_up"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notes_are_appended_with_author(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = submit_lead(app.router(), "Asha Rao").await;

    for note in ["First call went well", "Sent the brochure"] {
        let response = post_json_auth(
            app.router(),
            &format!("/api/v1/leads/{id}/notes"),
            json!({ "note": note }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(app.router(), &format!("/api/v1/leads/{id}"), &token).await;
    let notes = body_json(response).await["data"]["notes"]
        .as_str()
        .unwrap()
        .to_string();
    let first = notes.find("First call went well").unwrap();
    let second = notes.find("Sent the brochure").unwrap();
    assert!(first < second);
    assert!(notes.contains("Site Admin"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_refuses_to_replace_notes(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = submit_lead(app.router(), "Asha Rao").await;

    let response = patch_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}"),
        json!({ "notes": "overwrite" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["errors"]["notes"].is_array());

    let response = patch_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}"),
        json!({ "priority": "urgent" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["priority"], "urgent");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_and_restore(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let id = submit_lead(app.router(), "Asha Rao").await;

    let response = delete_auth(app.router(), &format!("/api/v1/leads/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.router(), &format!("/api/v1/leads/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.router(), "/api/v1/leads?include_deleted=true", &token).await;
    assert_eq!(body_json(response).await["data"]["pagination"]["total"], 1);

    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}/restore"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/leads/{id}/restore"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Lead is not deleted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_status_change_reports_counts(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let a = submit_lead(app.router(), "Asha Rao").await;
    let b = submit_lead(app.router(), "Vikram Shah").await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/leads/bulk-action",
        json!({ "lead_ids": [a, b, b], "action": "change_status", "status": "qualified" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["updated_count"], 2);
    assert_eq!(json["data"]["requested_count"], 2);

    let response = get_auth(app.router(), "/api/v1/leads/statistics", &token).await;
    let stats = body_json(response).await["data"].clone();
    assert_eq!(stats["total_leads"], 2);
    assert_eq!(stats["qualified_leads"], 2);
    assert_eq!(stats["qualification_rate"], 100.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_action_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/leads/bulk-action",
        json!({ "lead_ids": [], "action": "change_status" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["lead_ids"].is_array());
    assert!(json["errors"]["status"].is_array());

    let response = post_json_auth(
        app.router(),
        "/api/v1/leads/bulk-action",
        json!({ "lead_ids": [424_242], "action": "delete" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "No leads found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lead_can_reference_a_project(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(&pool, app.router()).await;
    let response = post_json_auth(
        app.router(),
        "/api/v1/projects",
        project_body("Green Meadows", "PRM/KA/RERA/1251/446/PR/2024"),
        &token,
    )
    .await;
    let project_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut body = lead_body("Asha Rao");
    body["project_id"] = json!(project_id);
    let response = post_json(app.router(), "/api/v1/leads", body).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.router(), &format!("/api/v1/leads/{id}"), &token).await;
    assert_eq!(
        body_json(response).await["data"]["project_title"],
        "Green Meadows"
    );
}
