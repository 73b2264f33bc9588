//! Homepage content singleton.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `homepage_content` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct HomePageContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_background_image: String,
    pub hero_cta_button_text: String,
    pub stats_experience_value: String,
    pub stats_experience_label: String,
    pub stats_projects_value: String,
    pub stats_projects_label: String,
    pub stats_families_value: String,
    pub stats_families_label: String,
    pub stats_sqft_value: String,
    pub stats_sqft_label: String,
    pub footer_office_address: String,
    pub footer_phone_number: String,
    pub footer_email: String,
    pub footer_whatsapp_number: String,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of the homepage content. Section endpoints only populate
/// their own fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHomePageContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_background_image: Option<String>,
    pub hero_cta_button_text: Option<String>,
    pub stats_experience_value: Option<String>,
    pub stats_experience_label: Option<String>,
    pub stats_projects_value: Option<String>,
    pub stats_projects_label: Option<String>,
    pub stats_families_value: Option<String>,
    pub stats_families_label: Option<String>,
    pub stats_sqft_value: Option<String>,
    pub stats_sqft_label: Option<String>,
    pub footer_office_address: Option<String>,
    pub footer_phone_number: Option<String>,
    pub footer_email: Option<String>,
    pub footer_whatsapp_number: Option<String>,
}
