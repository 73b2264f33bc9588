//! Project entity model and DTOs.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub location: String,
    pub rera_number: String,
    pub description: String,
    pub status: String,
    pub hero_image_url: String,
    pub brochure_url: String,
    pub configurations: Vec<String>,
    pub amenities: Vec<String>,
    pub is_featured: bool,
    pub view_count: i64,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub location: Option<String>,
    pub rera_number: String,
    pub description: Option<String>,
    /// Defaults to `upcoming` if omitted.
    pub status: Option<String>,
    pub hero_image_url: String,
    pub brochure_url: Option<String>,
    #[serde(default)]
    pub configurations: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub location: Option<String>,
    pub rera_number: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub hero_image_url: Option<String>,
    pub brochure_url: Option<String>,
    pub configurations: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

/// Filters accepted by the project list.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<String>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    pub include_deleted: bool,
}
