use axum::extract::State;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::{ok, Envelope};
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// `"connected"` or `"unreachable"`.
    pub database: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Envelope<HealthResponse> {
    let db_healthy = greenhomes_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    ok(
        "Service health retrieved",
        HealthResponse {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database: if db_healthy { "connected" } else { "unreachable" },
        },
    )
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
