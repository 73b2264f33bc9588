//! Per-page hero images singleton.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `page_hero_images` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PageHeroImages {
    pub projects_hero_image: String,
    pub about_hero_image: String,
    pub contact_hero_image: String,
    pub about_our_story_image: String,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePageHeroImages {
    pub projects_hero_image: Option<String>,
    pub about_hero_image: Option<String>,
    pub contact_hero_image: Option<String>,
    pub about_our_story_image: Option<String>,
}
