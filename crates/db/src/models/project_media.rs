//! Project gallery images and floor plans.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_gallery_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub project_id: DbId,
    pub image_url: String,
    pub caption: String,
    pub display_order: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryImage {
    pub image_url: String,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryImage {
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
}

/// A row from the `project_floor_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FloorPlan {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub file_url: String,
    pub display_order: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFloorPlan {
    pub title: String,
    pub file_url: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFloorPlan {
    pub title: Option<String>,
    pub file_url: Option<String>,
    pub display_order: Option<i32>,
}
