//! Uploaded image model and DTOs.

use greenhomes_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `uploaded_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UploadedImage {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    /// Path relative to the storage root.
    #[serde(skip_serializing)]
    pub storage_path: String,
    pub uploaded_by: Option<DbId>,
    pub uploaded_by_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a stored upload.
#[derive(Debug, Clone)]
pub struct CreateUploadedImage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub storage_path: String,
    pub uploaded_by: Option<DbId>,
}
