//! Route definitions for the `/testimonials` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::testimonials;
use crate::state::AppState;

/// Routes mounted at `/testimonials`.
///
/// ```text
/// GET    /               -> list_testimonials (public; admins see more)
/// POST   /               -> create_testimonial
/// POST   /bulk-action    -> bulk_action
/// GET    /{id}           -> get_testimonial
/// PUT    /{id}           -> update_testimonial
/// PATCH  /{id}           -> update_testimonial
/// DELETE /{id}           -> delete_testimonial
/// POST   /{id}/restore   -> restore_testimonial
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route("/bulk-action", post(testimonials::bulk_action))
        .route(
            "/{id}",
            get(testimonials::get_testimonial)
                .put(testimonials::update_testimonial)
                .patch(testimonials::update_testimonial)
                .delete(testimonials::delete_testimonial),
        )
        .route("/{id}/restore", post(testimonials::restore_testimonial))
}
