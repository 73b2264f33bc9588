//! Route definitions for the `/leads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET    /                -> list_leads (admin)
/// POST   /                -> create_lead (public)
/// GET    /statistics      -> lead_statistics
/// POST   /bulk-action     -> bulk_action
/// GET    /{id}            -> get_lead
/// PUT    /{id}            -> update_lead
/// PATCH  /{id}            -> update_lead
/// DELETE /{id}            -> delete_lead
/// POST   /{id}/status     -> update_status
/// POST   /{id}/notes      -> add_note
/// POST   /{id}/restore    -> restore_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route("/statistics", get(leads::lead_statistics))
        .route("/bulk-action", post(leads::bulk_action))
        .route(
            "/{id}",
            get(leads::get_lead)
                .put(leads::update_lead)
                .patch(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route("/{id}/status", post(leads::update_status))
        .route("/{id}/notes", post(leads::add_note))
        .route("/{id}/restore", post(leads::restore_lead))
}
