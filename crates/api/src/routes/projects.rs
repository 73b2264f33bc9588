//! Route definitions for the `/projects` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                              -> list_projects (public)
/// POST   /                              -> create_project
/// GET    /configurations                -> configurations (public)
/// GET    /amenities                     -> amenities (public)
/// POST   /bulk-action                   -> bulk_action
/// GET    /{id}                          -> get_project (public)
/// PUT    /{id}                          -> update_project
/// PATCH  /{id}                          -> update_project
/// DELETE /{id}                          -> delete_project
/// POST   /{id}/restore                  -> restore_project
/// POST   /{id}/clone                    -> clone_project
/// GET    /{id}/gallery                  -> list_gallery
/// POST   /{id}/gallery                  -> add_gallery_image
/// PUT    /{id}/gallery/{image_id}       -> update_gallery_image
/// DELETE /{id}/gallery/{image_id}       -> delete_gallery_image
/// GET    /{id}/floor-plans              -> list_floor_plans
/// POST   /{id}/floor-plans              -> add_floor_plan
/// PUT    /{id}/floor-plans/{plan_id}    -> update_floor_plan
/// DELETE /{id}/floor-plans/{plan_id}    -> delete_floor_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/configurations", get(projects::configurations))
        .route("/amenities", get(projects::amenities))
        .route("/bulk-action", post(projects::bulk_action))
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/{id}/restore", post(projects::restore_project))
        .route("/{id}/clone", post(projects::clone_project))
        .route(
            "/{id}/gallery",
            get(projects::list_gallery).post(projects::add_gallery_image),
        )
        .route(
            "/{id}/gallery/{image_id}",
            put(projects::update_gallery_image).delete(projects::delete_gallery_image),
        )
        .route(
            "/{id}/floor-plans",
            get(projects::list_floor_plans).post(projects::add_floor_plan),
        )
        .route(
            "/{id}/floor-plans/{plan_id}",
            put(projects::update_floor_plan).delete(projects::delete_floor_plan),
        )
}
