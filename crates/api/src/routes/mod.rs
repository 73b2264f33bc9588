pub mod auth;
pub mod dashboard;
pub mod health;
pub mod homepage;
pub mod leads;
pub mod projects;
pub mod settings;
pub mod testimonials;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login | refresh | logout | me | change-password
///
/// /leads                                   list (admin), create (public)
/// /leads/statistics                        aggregate counts
/// /leads/bulk-action                       bulk delete/restore/status/priority/assign
/// /leads/{id}                              get, update, delete
/// /leads/{id}/status | notes | restore     workflow actions
///
/// /projects                                list (public), create
/// /projects/configurations | amenities     catalogs (public)
/// /projects/bulk-action                    bulk delete/restore/feature/status
/// /projects/{id}                           get (public), update, delete
/// /projects/{id}/restore | clone           lifecycle actions
/// /projects/{id}/gallery[/{image_id}]      gallery images
/// /projects/{id}/floor-plans[/{plan_id}]   floor plans
///
/// /testimonials                            list (public), create
/// /testimonials/bulk-action                bulk actions
/// /testimonials/{id}[/restore]             get, update, delete, restore
///
/// /homepage                                complete public view
/// /homepage/content | hero | statistics | footer
/// /homepage/featured-projects[/{id}]
/// /homepage/testimonials
///
/// /settings/contact[/public|whatsapp|phones|emails|address|social]
/// /settings/system[/backup]
/// /settings/page-hero-images
/// /settings/session
///
/// /uploads[/{id}]                          admin image library
///
/// /dashboard[/stats|recent-leads|system-status|analytics]
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/leads", leads::router())
        .nest("/projects", projects::router())
        .nest("/testimonials", testimonials::router())
        .nest("/homepage", homepage::router())
        .nest("/settings", settings::router())
        .nest("/uploads", uploads::router())
        .nest("/dashboard", dashboard::router())
}
