//! Route definitions for the `/homepage` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::homepage;
use crate::state::AppState;

/// Routes mounted at `/homepage`. Reads are public, writes need an admin.
///
/// ```text
/// GET        /                          -> complete_homepage
/// GET|PUT    /content                   -> get_content, update_content
/// GET|PUT    /hero                      -> get_hero, update_hero
/// GET|PUT    /statistics                -> get_statistics, update_statistics
/// GET|PUT    /footer                    -> get_footer, update_footer
/// GET|POST   /featured-projects         -> list_featured, create_featured
/// GET|PUT|DELETE /featured-projects/{id} -> get_featured, update_featured, delete_featured
/// GET        /testimonials              -> homepage_testimonials
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage::complete_homepage))
        .route(
            "/content",
            get(homepage::get_content).put(homepage::update_content),
        )
        .route("/hero", get(homepage::get_hero).put(homepage::update_hero))
        .route(
            "/statistics",
            get(homepage::get_statistics).put(homepage::update_statistics),
        )
        .route(
            "/footer",
            get(homepage::get_footer).put(homepage::update_footer),
        )
        .route(
            "/featured-projects",
            get(homepage::list_featured).post(homepage::create_featured),
        )
        .route(
            "/featured-projects/{id}",
            get(homepage::get_featured)
                .put(homepage::update_featured)
                .delete(homepage::delete_featured),
        )
        .route("/testimonials", get(homepage::homepage_testimonials))
}
