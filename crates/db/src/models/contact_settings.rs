//! Contact settings singleton.

use greenhomes_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `contact_settings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ContactSettings {
    pub whatsapp_enabled: bool,
    pub whatsapp_number: String,
    pub whatsapp_business_hours: String,
    pub whatsapp_auto_reply: String,
    pub primary_phone: String,
    pub secondary_phone: String,
    pub toll_free_number: String,
    pub phone_business_hours: String,
    pub info_email: String,
    pub sales_email: String,
    pub support_email: String,
    pub email_auto_reply_enabled: bool,
    pub email_auto_reply_subject: String,
    pub email_auto_reply_message: String,
    pub street_address: String,
    pub area_locality: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub google_maps_embed: String,
    pub facebook_url: String,
    pub instagram_url: String,
    pub twitter_url: String,
    pub linkedin_url: String,
    pub youtube_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactSettings {
    pub whatsapp_enabled: Option<bool>,
    pub whatsapp_number: Option<String>,
    pub whatsapp_business_hours: Option<String>,
    pub whatsapp_auto_reply: Option<String>,
    pub primary_phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub toll_free_number: Option<String>,
    pub phone_business_hours: Option<String>,
    pub info_email: Option<String>,
    pub sales_email: Option<String>,
    pub support_email: Option<String>,
    pub email_auto_reply_enabled: Option<bool>,
    pub email_auto_reply_subject: Option<String>,
    pub email_auto_reply_message: Option<String>,
    pub street_address: Option<String>,
    pub area_locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub country: Option<String>,
    pub google_maps_embed: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,
}
