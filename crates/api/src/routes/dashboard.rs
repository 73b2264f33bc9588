//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard` (admin only).
///
/// ```text
/// GET /                -> overview
/// GET /stats           -> stats
/// GET /recent-leads    -> recent_leads
/// GET /system-status   -> system_status
/// GET /analytics       -> analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::overview))
        .route("/stats", get(dashboard::stats))
        .route("/recent-leads", get(dashboard::recent_leads))
        .route("/system-status", get(dashboard::system_status))
        .route("/analytics", get(dashboard::analytics))
}
