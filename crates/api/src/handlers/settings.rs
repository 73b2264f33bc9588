//! Handlers for `/settings`: contact details, system status, page hero
//! images and the caller's session info.

use axum::extract::State;
use chrono::Utc;
use greenhomes_core::contact::full_address;
use greenhomes_core::system::{validate_session_timeout, UptimeStatus};
use greenhomes_core::types::{DbId, Timestamp};
use greenhomes_core::validation::{
    validate_email, validate_optional_url, validate_phone, FieldErrors,
};
use greenhomes_db::models::contact_settings::{ContactSettings, UpdateContactSettings};
use greenhomes_db::models::page_hero_images::{PageHeroImages, UpdatePageHeroImages};
use greenhomes_db::models::system_status::{SystemStatus, UpdateSystemStatus};
use greenhomes_db::repositories::{
    ContactSettingsRepo, PageHeroImagesRepo, SessionRepo, SystemStatusRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::OptionalAdmin;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ok, Envelope};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Contact sections
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WhatsAppSection {
    pub whatsapp_enabled: Option<bool>,
    pub whatsapp_number: Option<String>,
    pub whatsapp_business_hours: Option<String>,
    pub whatsapp_auto_reply: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PhonesSection {
    pub primary_phone: Option<String>,
    pub secondary_phone: Option<String>,
    pub toll_free_number: Option<String>,
    pub phone_business_hours: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EmailsSection {
    pub info_email: Option<String>,
    pub sales_email: Option<String>,
    pub support_email: Option<String>,
    pub email_auto_reply_enabled: Option<bool>,
    pub email_auto_reply_subject: Option<String>,
    pub email_auto_reply_message: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AddressSection {
    pub street_address: Option<String>,
    pub area_locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub country: Option<String>,
    pub google_maps_embed: Option<String>,
    /// Derived; ignored on input.
    #[serde(default, skip_deserializing)]
    pub full_address: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SocialSection {
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,
}

impl From<&ContactSettings> for WhatsAppSection {
    fn from(c: &ContactSettings) -> Self {
        Self {
            whatsapp_enabled: Some(c.whatsapp_enabled),
            whatsapp_number: Some(c.whatsapp_number.clone()),
            whatsapp_business_hours: Some(c.whatsapp_business_hours.clone()),
            whatsapp_auto_reply: Some(c.whatsapp_auto_reply.clone()),
        }
    }
}

impl From<&ContactSettings> for PhonesSection {
    fn from(c: &ContactSettings) -> Self {
        Self {
            primary_phone: Some(c.primary_phone.clone()),
            secondary_phone: Some(c.secondary_phone.clone()),
            toll_free_number: Some(c.toll_free_number.clone()),
            phone_business_hours: Some(c.phone_business_hours.clone()),
        }
    }
}

impl From<&ContactSettings> for EmailsSection {
    fn from(c: &ContactSettings) -> Self {
        Self {
            info_email: Some(c.info_email.clone()),
            sales_email: Some(c.sales_email.clone()),
            support_email: Some(c.support_email.clone()),
            email_auto_reply_enabled: Some(c.email_auto_reply_enabled),
            email_auto_reply_subject: Some(c.email_auto_reply_subject.clone()),
            email_auto_reply_message: Some(c.email_auto_reply_message.clone()),
        }
    }
}

impl From<&ContactSettings> for AddressSection {
    fn from(c: &ContactSettings) -> Self {
        Self {
            street_address: Some(c.street_address.clone()),
            area_locality: Some(c.area_locality.clone()),
            city: Some(c.city.clone()),
            state: Some(c.state.clone()),
            pincode: Some(c.pincode.clone()),
            country: Some(c.country.clone()),
            google_maps_embed: Some(c.google_maps_embed.clone()),
            full_address: address_of(c),
        }
    }
}

impl From<&ContactSettings> for SocialSection {
    fn from(c: &ContactSettings) -> Self {
        Self {
            facebook_url: Some(c.facebook_url.clone()),
            instagram_url: Some(c.instagram_url.clone()),
            twitter_url: Some(c.twitter_url.clone()),
            linkedin_url: Some(c.linkedin_url.clone()),
            youtube_url: Some(c.youtube_url.clone()),
        }
    }
}

impl From<WhatsAppSection> for UpdateContactSettings {
    fn from(s: WhatsAppSection) -> Self {
        Self {
            whatsapp_enabled: s.whatsapp_enabled,
            whatsapp_number: s.whatsapp_number,
            whatsapp_business_hours: s.whatsapp_business_hours,
            whatsapp_auto_reply: s.whatsapp_auto_reply,
            ..Default::default()
        }
    }
}

impl From<PhonesSection> for UpdateContactSettings {
    fn from(s: PhonesSection) -> Self {
        Self {
            primary_phone: s.primary_phone,
            secondary_phone: s.secondary_phone,
            toll_free_number: s.toll_free_number,
            phone_business_hours: s.phone_business_hours,
            ..Default::default()
        }
    }
}

impl From<EmailsSection> for UpdateContactSettings {
    fn from(s: EmailsSection) -> Self {
        Self {
            info_email: s.info_email,
            sales_email: s.sales_email,
            support_email: s.support_email,
            email_auto_reply_enabled: s.email_auto_reply_enabled,
            email_auto_reply_subject: s.email_auto_reply_subject,
            email_auto_reply_message: s.email_auto_reply_message,
            ..Default::default()
        }
    }
}

impl From<AddressSection> for UpdateContactSettings {
    fn from(s: AddressSection) -> Self {
        Self {
            street_address: s.street_address,
            area_locality: s.area_locality,
            city: s.city,
            state: s.state,
            pincode: s.pincode,
            country: s.country,
            google_maps_embed: s.google_maps_embed,
            ..Default::default()
        }
    }
}

impl From<SocialSection> for UpdateContactSettings {
    fn from(s: SocialSection) -> Self {
        Self {
            facebook_url: s.facebook_url,
            instagram_url: s.instagram_url,
            twitter_url: s.twitter_url,
            linkedin_url: s.linkedin_url,
            youtube_url: s.youtube_url,
            ..Default::default()
        }
    }
}

/// Full contact settings plus the derived address line.
#[derive(Debug, Serialize)]
pub struct ContactSettingsView {
    #[serde(flatten)]
    pub settings: ContactSettings,
    pub full_address: String,
}

impl From<ContactSettings> for ContactSettingsView {
    fn from(settings: ContactSettings) -> Self {
        Self {
            full_address: address_of(&settings),
            settings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicWhatsApp {
    pub number: String,
    pub business_hours: String,
}

#[derive(Debug, Serialize)]
pub struct PublicPhones {
    pub primary: String,
    pub secondary: String,
    pub toll_free: String,
    pub business_hours: String,
}

#[derive(Debug, Serialize)]
pub struct PublicEmails {
    pub info: String,
    pub sales: String,
    pub support: String,
}

#[derive(Debug, Serialize)]
pub struct PublicAddress {
    pub full_address: String,
    pub google_maps_embed: String,
}

/// What the public site may show. The WhatsApp block is omitted when disabled.
#[derive(Debug, Serialize)]
pub struct PublicContactInfo {
    pub whatsapp: Option<PublicWhatsApp>,
    pub phones: PublicPhones,
    pub emails: PublicEmails,
    pub address: PublicAddress,
    pub social: SocialSection,
}

impl From<&ContactSettings> for PublicContactInfo {
    fn from(c: &ContactSettings) -> Self {
        Self {
            whatsapp: c.whatsapp_enabled.then(|| PublicWhatsApp {
                number: c.whatsapp_number.clone(),
                business_hours: c.whatsapp_business_hours.clone(),
            }),
            phones: PublicPhones {
                primary: c.primary_phone.clone(),
                secondary: c.secondary_phone.clone(),
                toll_free: c.toll_free_number.clone(),
                business_hours: c.phone_business_hours.clone(),
            },
            emails: PublicEmails {
                info: c.info_email.clone(),
                sales: c.sales_email.clone(),
                support: c.support_email.clone(),
            },
            address: PublicAddress {
                full_address: address_of(c),
                google_maps_embed: c.google_maps_embed.clone(),
            },
            social: c.into(),
        }
    }
}

fn address_of(c: &ContactSettings) -> String {
    full_address(&[
        c.street_address.as_str(),
        c.area_locality.as_str(),
        c.city.as_str(),
        c.state.as_str(),
        c.pincode.as_str(),
        c.country.as_str(),
    ])
}

// ---------------------------------------------------------------------------
// Contact handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/settings/contact
pub async fn get_contact(
    State(state): State<AppState>,
) -> AppResult<Envelope<ContactSettingsView>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("Contact settings retrieved successfully", settings.into()))
}

/// PUT /api/v1/settings/contact
pub async fn update_contact(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<UpdateContactSettings>,
) -> AppResult<Envelope<ContactSettingsView>> {
    let settings = apply_contact_update(&state, &input).await?;
    tracing::info!(admin_id = admin.user_id, "Contact settings updated");
    Ok(ok("Contact settings updated successfully", settings.into()))
}

/// GET /api/v1/settings/contact/public
pub async fn public_contact(
    State(state): State<AppState>,
) -> AppResult<Envelope<PublicContactInfo>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("Contact information retrieved successfully", (&settings).into()))
}

/// GET /api/v1/settings/contact/whatsapp
pub async fn get_whatsapp(State(state): State<AppState>) -> AppResult<Envelope<WhatsAppSection>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("WhatsApp settings retrieved successfully", (&settings).into()))
}

/// PUT /api/v1/settings/contact/whatsapp
pub async fn update_whatsapp(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<WhatsAppSection>,
) -> AppResult<Envelope<WhatsAppSection>> {
    let settings = apply_contact_update(&state, &input.into()).await?;
    Ok(ok("WhatsApp settings updated successfully", (&settings).into()))
}

/// GET /api/v1/settings/contact/phones
pub async fn get_phones(State(state): State<AppState>) -> AppResult<Envelope<PhonesSection>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("Phone settings retrieved successfully", (&settings).into()))
}

/// PUT /api/v1/settings/contact/phones
pub async fn update_phones(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<PhonesSection>,
) -> AppResult<Envelope<PhonesSection>> {
    let settings = apply_contact_update(&state, &input.into()).await?;
    Ok(ok("Phone settings updated successfully", (&settings).into()))
}

/// GET /api/v1/settings/contact/emails
pub async fn get_emails(State(state): State<AppState>) -> AppResult<Envelope<EmailsSection>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("Email settings retrieved successfully", (&settings).into()))
}

/// PUT /api/v1/settings/contact/emails
pub async fn update_emails(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<EmailsSection>,
) -> AppResult<Envelope<EmailsSection>> {
    let settings = apply_contact_update(&state, &input.into()).await?;
    Ok(ok("Email settings updated successfully", (&settings).into()))
}

/// GET /api/v1/settings/contact/address
pub async fn get_address(State(state): State<AppState>) -> AppResult<Envelope<AddressSection>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("Address settings retrieved successfully", (&settings).into()))
}

/// PUT /api/v1/settings/contact/address
pub async fn update_address(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<AddressSection>,
) -> AppResult<Envelope<AddressSection>> {
    let settings = apply_contact_update(&state, &input.into()).await?;
    Ok(ok("Address settings updated successfully", (&settings).into()))
}

/// GET /api/v1/settings/contact/social
pub async fn get_social(State(state): State<AppState>) -> AppResult<Envelope<SocialSection>> {
    let settings = ContactSettingsRepo::get_current(&state.pool).await?;
    Ok(ok("Social media settings retrieved successfully", (&settings).into()))
}

/// PUT /api/v1/settings/contact/social
pub async fn update_social(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(input): AppJson<SocialSection>,
) -> AppResult<Envelope<SocialSection>> {
    let settings = apply_contact_update(&state, &input.into()).await?;
    Ok(ok("Social media settings updated successfully", (&settings).into()))
}

/// Validate against the merged result, then persist.
async fn apply_contact_update(
    state: &AppState,
    input: &UpdateContactSettings,
) -> AppResult<ContactSettings> {
    let current = ContactSettingsRepo::get_current(&state.pool).await?;
    let mut errors = FieldErrors::new();

    let phones = [
        ("whatsapp_number", &input.whatsapp_number),
        ("primary_phone", &input.primary_phone),
        ("secondary_phone", &input.secondary_phone),
        ("toll_free_number", &input.toll_free_number),
    ];
    for (field, value) in phones {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            errors.check(field, validate_phone(v));
        }
    }

    let emails = [
        ("info_email", &input.info_email),
        ("sales_email", &input.sales_email),
        ("support_email", &input.support_email),
    ];
    for (field, value) in emails {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            errors.check(field, validate_email(v));
        }
    }

    let urls = [
        ("facebook_url", &input.facebook_url),
        ("instagram_url", &input.instagram_url),
        ("twitter_url", &input.twitter_url),
        ("linkedin_url", &input.linkedin_url),
        ("youtube_url", &input.youtube_url),
    ];
    for (field, value) in urls {
        if let Some(v) = value.as_deref() {
            errors.check(field, validate_optional_url(v.trim()));
        }
    }

    // Enforced only when the update touches the WhatsApp fields.
    let touches_whatsapp = input.whatsapp_enabled.is_some() || input.whatsapp_number.is_some();
    let enabled = input.whatsapp_enabled.unwrap_or(current.whatsapp_enabled);
    let number = input
        .whatsapp_number
        .as_deref()
        .unwrap_or(&current.whatsapp_number);
    if touches_whatsapp && enabled && number.trim().is_empty() {
        errors.add(
            "whatsapp_number",
            "WhatsApp number is required when WhatsApp is enabled.",
        );
    }
    errors.into_result()?;

    Ok(ContactSettingsRepo::update(&state.pool, input).await?)
}

// ---------------------------------------------------------------------------
// System status
// ---------------------------------------------------------------------------

/// Admin view of the system status.
#[derive(Debug, Serialize)]
pub struct SystemStatusView {
    #[serde(flatten)]
    pub status: SystemStatus,
    pub uptime_status: UptimeStatus,
}

impl From<SystemStatus> for SystemStatusView {
    fn from(status: SystemStatus) -> Self {
        Self {
            uptime_status: UptimeStatus::from_flags(
                status.website_status,
                status.whatsapp_integration_active,
                status.contact_forms_working,
                status.maintenance_mode,
            ),
            status,
        }
    }
}

/// What anonymous callers may learn about the site.
#[derive(Debug, Serialize)]
pub struct PublicSystemStatus {
    pub site_name: String,
    pub maintenance_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SystemStatusResponse {
    Full(SystemStatusView),
    Public(PublicSystemStatus),
}

/// GET /api/v1/settings/system
pub async fn get_system(
    State(state): State<AppState>,
    admin: OptionalAdmin,
) -> AppResult<Envelope<SystemStatusResponse>> {
    let status = SystemStatusRepo::get_current(&state.pool).await?;
    let body = if admin.is_admin() {
        SystemStatusResponse::Full(status.into())
    } else {
        SystemStatusResponse::Public(PublicSystemStatus {
            site_name: status.site_name,
            maintenance_mode: status.maintenance_mode,
            maintenance_message: status
                .maintenance_mode
                .then_some(status.maintenance_message),
        })
    };
    Ok(ok("System status retrieved successfully", body))
}

/// PUT /api/v1/settings/system
pub async fn update_system(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<UpdateSystemStatus>,
) -> AppResult<Envelope<SystemStatusView>> {
    let mut errors = FieldErrors::new();
    if let Some(minutes) = input.session_timeout {
        errors.check("session_timeout", validate_session_timeout(minutes));
    }
    if let Some(email) = input
        .notification_email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    {
        errors.check("notification_email", validate_email(email));
    }
    if let Some(ref url) = input.site_url {
        errors.check("site_url", validate_optional_url(url.trim()));
    }
    if matches!(input.site_name.as_deref(), Some(name) if name.trim().is_empty()) {
        errors.add("site_name", "Site name is required.");
    }
    errors.into_result()?;

    let status = SystemStatusRepo::update(&state.pool, &input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        maintenance_mode = status.maintenance_mode,
        "System status updated"
    );
    Ok(ok("System status updated successfully", status.into()))
}

/// POST /api/v1/settings/system/backup
pub async fn record_backup(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Envelope<SystemStatusView>> {
    let status = SystemStatusRepo::record_backup(&state.pool).await?;
    tracing::info!(admin_id = admin.user_id, "Backup recorded");
    Ok(ok("Backup recorded successfully", status.into()))
}

// ---------------------------------------------------------------------------
// Page hero images
// ---------------------------------------------------------------------------

/// GET /api/v1/settings/page-hero-images
pub async fn get_page_hero_images(
    State(state): State<AppState>,
) -> AppResult<Envelope<PageHeroImages>> {
    let images = PageHeroImagesRepo::get_current(&state.pool).await?;
    Ok(ok("Page hero images retrieved successfully", images))
}

/// PUT /api/v1/settings/page-hero-images
pub async fn update_page_hero_images(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<UpdatePageHeroImages>,
) -> AppResult<Envelope<PageHeroImages>> {
    let images = PageHeroImagesRepo::update(&state.pool, &input, Some(admin.user_id)).await?;
    Ok(ok("Page hero images updated successfully", images))
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: DbId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user_id: DbId,
    pub role: String,
    pub token_issued_at: Option<Timestamp>,
    pub token_expires_at: Option<Timestamp>,
    pub token_seconds_remaining: Option<i64>,
    pub session_timeout_minutes: i32,
    pub active_sessions: Vec<SessionSummary>,
}

/// GET /api/v1/settings/session
pub async fn session_info(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Envelope<SessionInfo>> {
    let status = SystemStatusRepo::get_current(&state.pool).await?;
    let sessions = SessionRepo::list_active_for_admin(&state.pool, admin.user_id).await?;
    let now = Utc::now();

    Ok(ok(
        "Session information retrieved successfully",
        SessionInfo {
            user_id: admin.user_id,
            token_issued_at: admin.issued_at,
            token_expires_at: admin.expires_at,
            token_seconds_remaining: admin
                .expires_at
                .map(|exp| (exp - now).num_seconds().max(0)),
            role: admin.role,
            session_timeout_minutes: status.session_timeout,
            active_sessions: sessions
                .into_iter()
                .map(|s| SessionSummary {
                    id: s.id,
                    created_at: s.created_at,
                    expires_at: s.expires_at,
                    user_agent: s.user_agent,
                })
                .collect(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ContactSettings {
        let now = Utc::now();
        ContactSettings {
            whatsapp_enabled: false,
            whatsapp_number: "+91 98450 00000".into(),
            whatsapp_business_hours: "9 AM - 7 PM".into(),
            whatsapp_auto_reply: String::new(),
            primary_phone: "080 4000 0000".into(),
            secondary_phone: String::new(),
            toll_free_number: String::new(),
            phone_business_hours: String::new(),
            info_email: "info@example.com".into(),
            sales_email: String::new(),
            support_email: String::new(),
            email_auto_reply_enabled: false,
            email_auto_reply_subject: String::new(),
            email_auto_reply_message: String::new(),
            street_address: "27th Main".into(),
            area_locality: "HSR Layout".into(),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            pincode: String::new(),
            country: "India".into(),
            google_maps_embed: String::new(),
            facebook_url: String::new(),
            instagram_url: String::new(),
            twitter_url: String::new(),
            linkedin_url: String::new(),
            youtube_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn public_contact_hides_disabled_whatsapp() {
        let info = PublicContactInfo::from(&settings());
        assert!(info.whatsapp.is_none());
        assert_eq!(
            info.address.full_address,
            "27th Main, HSR Layout, Bengaluru, Karnataka, India"
        );

        let mut enabled = settings();
        enabled.whatsapp_enabled = true;
        let info = PublicContactInfo::from(&enabled);
        assert_eq!(info.whatsapp.unwrap().number, "+91 98450 00000");
    }

    #[test]
    fn section_update_touches_only_its_fields() {
        let update: UpdateContactSettings = SocialSection {
            instagram_url: Some("https://instagram.com/greenhomes".into()),
            ..Default::default()
        }
        .into();
        assert_eq!(
            update.instagram_url.as_deref(),
            Some("https://instagram.com/greenhomes")
        );
        assert!(update.primary_phone.is_none());
        assert!(update.whatsapp_enabled.is_none());
    }
}
