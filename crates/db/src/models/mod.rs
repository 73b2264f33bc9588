//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Singleton settings tables have no create DTO; their row is materialised
//! lazily by the repository.

pub mod admin_user;
pub mod contact_settings;
pub mod dashboard;
pub mod featured_project;
pub mod homepage;
pub mod lead;
pub mod page_hero_images;
pub mod project;
pub mod project_media;
pub mod session;
pub mod system_status;
pub mod testimonial;
pub mod uploaded_image;
