//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod contact_settings_repo;
pub mod dashboard_repo;
pub mod featured_project_repo;
pub mod homepage_repo;
pub mod lead_repo;
pub mod page_hero_images_repo;
pub mod project_media_repo;
pub mod project_repo;
pub mod session_repo;
pub mod system_status_repo;
pub mod testimonial_repo;
pub mod uploaded_image_repo;

pub use admin_user_repo::AdminUserRepo;
pub use contact_settings_repo::ContactSettingsRepo;
pub use dashboard_repo::DashboardRepo;
pub use featured_project_repo::FeaturedProjectRepo;
pub use homepage_repo::HomePageRepo;
pub use lead_repo::LeadRepo;
pub use page_hero_images_repo::PageHeroImagesRepo;
pub use project_media_repo::{FloorPlanRepo, GalleryImageRepo};
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use system_status_repo::SystemStatusRepo;
pub use testimonial_repo::TestimonialRepo;
pub use uploaded_image_repo::UploadedImageRepo;
