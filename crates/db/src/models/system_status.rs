//! System status singleton.

use greenhomes_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single row of the `system_status` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SystemStatus {
    pub site_name: String,
    pub site_url: String,
    pub website_status: bool,
    pub whatsapp_integration_active: bool,
    pub contact_forms_working: bool,
    pub last_backup_at: Option<Timestamp>,
    pub auto_backup_enabled: bool,
    pub session_timeout: i32,
    pub maintenance_mode: bool,
    pub maintenance_message: String,
    pub email_notifications_enabled: bool,
    pub notification_email: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSystemStatus {
    pub site_name: Option<String>,
    pub site_url: Option<String>,
    pub website_status: Option<bool>,
    pub whatsapp_integration_active: Option<bool>,
    pub contact_forms_working: Option<bool>,
    pub auto_backup_enabled: Option<bool>,
    pub session_timeout: Option<i32>,
    pub maintenance_mode: Option<bool>,
    pub maintenance_message: Option<String>,
    pub email_notifications_enabled: Option<bool>,
    pub notification_email: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}
