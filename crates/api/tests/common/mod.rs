//! Shared helpers for the HTTP-level integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use greenhomes_api::auth::jwt::JwtConfig;
use greenhomes_api::auth::password::hash_password;
use greenhomes_api::config::{LogFormat, ServerConfig};
use greenhomes_api::router::build_app_router;
use greenhomes_api::state::AppState;
use greenhomes_core::roles::ROLE_SUPER_ADMIN;
use greenhomes_core::storage::LocalFileStorage;
use greenhomes_db::models::admin_user::{AdminUser, CreateAdminUser};
use greenhomes_db::repositories::AdminUserRepo;

pub const ADMIN_PASSWORD: &str = "Str0ng!Passw0rd";

/// Build a test `ServerConfig` with safe defaults and the given media root.
pub fn test_config(media_root: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        media_root,
        media_url: "/media".to_string(),
        max_upload_bytes: 1024 * 1024,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
    }
}

/// The application router plus the temporary media directory backing it.
///
/// Keep the value alive for the duration of the test; dropping it removes
/// the directory.
pub struct TestApp {
    pub router: Router,
    pub media: tempfile::TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let media = tempfile::tempdir().expect("temp media dir");
    let config = test_config(media.path().to_path_buf());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(LocalFileStorage::new(
            media.path().to_path_buf(),
            config.media_url.clone(),
        )),
    };
    TestApp {
        router: build_app_router(state, &config),
        media,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an admin with [`ADMIN_PASSWORD`].
pub async fn create_admin(pool: &PgPool, email: &str) -> AdminUser {
    AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: email.to_string(),
            full_name: "Site Admin".to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).expect("hashing should succeed"),
            role: ROLE_SUPER_ADMIN.to_string(),
            is_superuser: true,
        },
    )
    .await
    .expect("admin creation should succeed")
}

/// Log in through the API and return the `data` payload.
pub async fn login(app: Router, email: &str, password: &str) -> Value {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["data"].clone()
}

/// Create an admin and return an access token for it.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    let email = "admin@hsrgreenhomes.test";
    create_admin(pool, email).await;
    let data = login(app, email, ADMIN_PASSWORD).await;
    data["tokens"]["access"]
        .as_str()
        .expect("access token")
        .to_string()
}

pub fn project_body(title: &str, rera: &str) -> Value {
    json!({
        "title": title,
        "location": "Whitefield, Bengaluru",
        "rera_number": rera,
        "description": "Premium apartments",
        "hero_image_url": "/media/uploads/hero.jpg",
        "configurations": ["2bhk", "3bhk"],
        "amenities": ["gym", "swimming_pool"],
    })
}

pub fn lead_body(name: &str) -> Value {
    json!({
        "name": name,
        "email": "buyer@example.com",
        "phone": "+91 98765 43210",
        "message": "Interested in a 3BHK, please call me back.",
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a multipart form built from `(name, file_name, bytes)` parts.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[(&str, Option<&str>, &[u8])],
    token: &str,
) -> Response {
    let boundary = "----greenhomes-test-boundary";
    let mut body = Vec::new();
    for (name, file_name, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
