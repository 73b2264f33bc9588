//! Featured-project entries shown on the homepage.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A featured entry joined with the summary of its project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeaturedProject {
    pub id: DbId,
    pub project_id: DbId,
    pub display_order: i32,
    pub is_active: bool,
    pub project_title: String,
    pub project_slug: String,
    pub project_location: String,
    pub project_status: String,
    pub project_hero_image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeaturedProject {
    pub project_id: DbId,
    /// Appended after the current last entry if omitted.
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFeaturedProject {
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
