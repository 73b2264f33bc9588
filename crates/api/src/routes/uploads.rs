//! Route definitions for the `/uploads` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads` (admin only).
///
/// ```text
/// GET    /       -> list_uploads
/// POST   /       -> upload_image (multipart)
/// GET    /{id}   -> get_upload
/// DELETE /{id}   -> delete_upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(uploads::list_uploads).post(uploads::upload_image))
        .route(
            "/{id}",
            get(uploads::get_upload).delete(uploads::delete_upload),
        )
}
