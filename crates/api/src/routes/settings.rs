//! Route definitions for the `/settings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET|PUT  /contact             -> get_contact, update_contact
/// GET      /contact/public      -> public_contact
/// GET|PUT  /contact/whatsapp    -> get_whatsapp, update_whatsapp
/// GET|PUT  /contact/phones      -> get_phones, update_phones
/// GET|PUT  /contact/emails      -> get_emails, update_emails
/// GET|PUT  /contact/address     -> get_address, update_address
/// GET|PUT  /contact/social      -> get_social, update_social
/// GET|PUT  /system              -> get_system, update_system
/// POST     /system/backup       -> record_backup
/// GET|PUT  /page-hero-images    -> get_page_hero_images, update_page_hero_images
/// GET      /session             -> session_info
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/contact",
            get(settings::get_contact).put(settings::update_contact),
        )
        .route("/contact/public", get(settings::public_contact))
        .route(
            "/contact/whatsapp",
            get(settings::get_whatsapp).put(settings::update_whatsapp),
        )
        .route(
            "/contact/phones",
            get(settings::get_phones).put(settings::update_phones),
        )
        .route(
            "/contact/emails",
            get(settings::get_emails).put(settings::update_emails),
        )
        .route(
            "/contact/address",
            get(settings::get_address).put(settings::update_address),
        )
        .route(
            "/contact/social",
            get(settings::get_social).put(settings::update_social),
        )
        .route(
            "/system",
            get(settings::get_system).put(settings::update_system),
        )
        .route("/system/backup", post(settings::record_backup))
        .route(
            "/page-hero-images",
            get(settings::get_page_hero_images).put(settings::update_page_hero_images),
        )
        .route("/session", get(settings::session_info))
}
