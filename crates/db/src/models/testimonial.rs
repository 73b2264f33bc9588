//! Testimonial entity model and DTOs.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A testimonial row joined with its project title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub customer_name: String,
    pub project_id: Option<DbId>,
    pub project_title: Option<String>,
    pub quote: String,
    pub customer_photo: String,
    pub rating: i32,
    pub verified: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub customer_name: String,
    pub project_id: Option<DbId>,
    pub quote: String,
    pub customer_photo: Option<String>,
    /// Defaults to 5 if omitted.
    pub rating: Option<i32>,
    pub verified: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// DTO for updating a testimonial. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestimonial {
    pub customer_name: Option<String>,
    pub project_id: Option<DbId>,
    pub quote: Option<String>,
    pub customer_photo: Option<String>,
    pub rating: Option<i32>,
    pub verified: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// Filters accepted by the testimonial list.
#[derive(Debug, Clone, Default)]
pub struct TestimonialFilter {
    pub project_id: Option<DbId>,
    pub is_active: Option<bool>,
    pub verified: Option<bool>,
    pub min_rating: Option<i32>,
    pub search: Option<String>,
    pub include_deleted: bool,
}
