//! Handlers for `/homepage`: the content singleton split into sections,
//! featured projects and the public testimonial block.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use greenhomes_core::error::CoreError;
use greenhomes_core::listing::clamp_limit;
use greenhomes_core::testimonial::{DEFAULT_DISPLAY_LIMIT, MAX_DISPLAY_LIMIT};
use greenhomes_core::types::DbId;
use greenhomes_core::validation::{validate_email, validate_phone, FieldErrors};
use greenhomes_db::models::featured_project::{
    CreateFeaturedProject, FeaturedProject, UpdateFeaturedProject,
};
use greenhomes_db::models::homepage::{HomePageContent, UpdateHomePageContent};
use greenhomes_db::models::testimonial::Testimonial;
use greenhomes_db::repositories::{
    FeaturedProjectRepo, HomePageRepo, ProjectRepo, TestimonialRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::OptionalAdmin;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{AllParams, LimitParams};
use crate::response::{created, message, ok, Envelope};
use crate::state::AppState;

/// Featured projects shown on the homepage.
const HOMEPAGE_FEATURED: i64 = 6;

/// Upper bound for the public featured-projects list.
const FEATURED_LIST_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroSection {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_background_image: Option<String>,
    pub hero_cta_button_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsSection {
    pub stats_experience_value: Option<String>,
    pub stats_experience_label: Option<String>,
    pub stats_projects_value: Option<String>,
    pub stats_projects_label: Option<String>,
    pub stats_families_value: Option<String>,
    pub stats_families_label: Option<String>,
    pub stats_sqft_value: Option<String>,
    pub stats_sqft_label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterSection {
    pub footer_office_address: Option<String>,
    pub footer_phone_number: Option<String>,
    pub footer_email: Option<String>,
    pub footer_whatsapp_number: Option<String>,
}

impl From<&HomePageContent> for HeroSection {
    fn from(c: &HomePageContent) -> Self {
        Self {
            hero_title: Some(c.hero_title.clone()),
            hero_subtitle: Some(c.hero_subtitle.clone()),
            hero_background_image: Some(c.hero_background_image.clone()),
            hero_cta_button_text: Some(c.hero_cta_button_text.clone()),
        }
    }
}

impl From<&HomePageContent> for StatisticsSection {
    fn from(c: &HomePageContent) -> Self {
        Self {
            stats_experience_value: Some(c.stats_experience_value.clone()),
            stats_experience_label: Some(c.stats_experience_label.clone()),
            stats_projects_value: Some(c.stats_projects_value.clone()),
            stats_projects_label: Some(c.stats_projects_label.clone()),
            stats_families_value: Some(c.stats_families_value.clone()),
            stats_families_label: Some(c.stats_families_label.clone()),
            stats_sqft_value: Some(c.stats_sqft_value.clone()),
            stats_sqft_label: Some(c.stats_sqft_label.clone()),
        }
    }
}

impl From<&HomePageContent> for FooterSection {
    fn from(c: &HomePageContent) -> Self {
        Self {
            footer_office_address: Some(c.footer_office_address.clone()),
            footer_phone_number: Some(c.footer_phone_number.clone()),
            footer_email: Some(c.footer_email.clone()),
            footer_whatsapp_number: Some(c.footer_whatsapp_number.clone()),
        }
    }
}

impl From<HeroSection> for UpdateHomePageContent {
    fn from(s: HeroSection) -> Self {
        Self {
            hero_title: s.hero_title,
            hero_subtitle: s.hero_subtitle,
            hero_background_image: s.hero_background_image,
            hero_cta_button_text: s.hero_cta_button_text,
            ..Default::default()
        }
    }
}

impl From<StatisticsSection> for UpdateHomePageContent {
    fn from(s: StatisticsSection) -> Self {
        Self {
            stats_experience_value: s.stats_experience_value,
            stats_experience_label: s.stats_experience_label,
            stats_projects_value: s.stats_projects_value,
            stats_projects_label: s.stats_projects_label,
            stats_families_value: s.stats_families_value,
            stats_families_label: s.stats_families_label,
            stats_sqft_value: s.stats_sqft_value,
            stats_sqft_label: s.stats_sqft_label,
            ..Default::default()
        }
    }
}

impl From<FooterSection> for UpdateHomePageContent {
    fn from(s: FooterSection) -> Self {
        Self {
            footer_office_address: s.footer_office_address,
            footer_phone_number: s.footer_phone_number,
            footer_email: s.footer_email,
            footer_whatsapp_number: s.footer_whatsapp_number,
            ..Default::default()
        }
    }
}

/// Everything the public homepage renders, in one response.
#[derive(Debug, Serialize)]
pub struct CompleteHomePage {
    pub hero: HeroSection,
    pub statistics: StatisticsSection,
    pub footer: FooterSection,
    pub featured_projects: Vec<FeaturedProject>,
    pub testimonials: Vec<Testimonial>,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// GET /api/v1/homepage
pub async fn complete_homepage(
    State(state): State<AppState>,
) -> AppResult<Envelope<CompleteHomePage>> {
    let content = HomePageRepo::get_current(&state.pool).await?;
    let featured_projects = FeaturedProjectRepo::list_active(&state.pool, HOMEPAGE_FEATURED).await?;
    let testimonials = TestimonialRepo::list_for_display(&state.pool, DEFAULT_DISPLAY_LIMIT).await?;

    Ok(ok(
        "Homepage data retrieved successfully",
        CompleteHomePage {
            hero: (&content).into(),
            statistics: (&content).into(),
            footer: (&content).into(),
            featured_projects,
            testimonials,
        },
    ))
}

/// GET /api/v1/homepage/content
pub async fn get_content(State(state): State<AppState>) -> AppResult<Envelope<HomePageContent>> {
    let content = HomePageRepo::get_current(&state.pool).await?;
    Ok(ok("Homepage content retrieved successfully", content))
}

/// PUT /api/v1/homepage/content
pub async fn update_content(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<UpdateHomePageContent>,
) -> AppResult<Envelope<HomePageContent>> {
    validate_footer(input.footer_email.as_deref(), input.footer_phone_number.as_deref())?;
    let content = HomePageRepo::update(&state.pool, &input, Some(admin.user_id)).await?;
    tracing::info!(admin_id = admin.user_id, "Homepage content updated");
    Ok(ok("Homepage content updated successfully", content))
}

/// GET /api/v1/homepage/hero
pub async fn get_hero(State(state): State<AppState>) -> AppResult<Envelope<HeroSection>> {
    let content = HomePageRepo::get_current(&state.pool).await?;
    Ok(ok("Hero section retrieved successfully", (&content).into()))
}

/// PUT /api/v1/homepage/hero
pub async fn update_hero(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<HeroSection>,
) -> AppResult<Envelope<HeroSection>> {
    let content = HomePageRepo::update(&state.pool, &input.into(), Some(admin.user_id)).await?;
    Ok(ok("Hero section updated successfully", (&content).into()))
}

/// GET /api/v1/homepage/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
) -> AppResult<Envelope<StatisticsSection>> {
    let content = HomePageRepo::get_current(&state.pool).await?;
    Ok(ok("Statistics section retrieved successfully", (&content).into()))
}

/// PUT /api/v1/homepage/statistics
pub async fn update_statistics(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<StatisticsSection>,
) -> AppResult<Envelope<StatisticsSection>> {
    let content = HomePageRepo::update(&state.pool, &input.into(), Some(admin.user_id)).await?;
    Ok(ok("Statistics section updated successfully", (&content).into()))
}

/// GET /api/v1/homepage/footer
pub async fn get_footer(State(state): State<AppState>) -> AppResult<Envelope<FooterSection>> {
    let content = HomePageRepo::get_current(&state.pool).await?;
    Ok(ok("Footer section retrieved successfully", (&content).into()))
}

/// PUT /api/v1/homepage/footer
pub async fn update_footer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<FooterSection>,
) -> AppResult<Envelope<FooterSection>> {
    validate_footer(input.footer_email.as_deref(), input.footer_phone_number.as_deref())?;
    let content = HomePageRepo::update(&state.pool, &input.into(), Some(admin.user_id)).await?;
    Ok(ok("Footer section updated successfully", (&content).into()))
}

/// GET /api/v1/homepage/testimonials
pub async fn homepage_testimonials(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<Envelope<Vec<Testimonial>>> {
    let limit = clamp_limit(params.limit, DEFAULT_DISPLAY_LIMIT, MAX_DISPLAY_LIMIT);
    let testimonials = TestimonialRepo::list_for_display(&state.pool, limit).await?;
    Ok(ok("Testimonials retrieved successfully", testimonials))
}

// ---------------------------------------------------------------------------
// Featured projects
// ---------------------------------------------------------------------------

/// GET /api/v1/homepage/featured-projects
///
/// Admins may pass `?all=true` to include inactive entries.
pub async fn list_featured(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    AppQuery(params): AppQuery<AllParams>,
) -> AppResult<Envelope<Vec<FeaturedProject>>> {
    let entries = if params.all && admin.is_admin() {
        FeaturedProjectRepo::list_all(&state.pool).await?
    } else {
        FeaturedProjectRepo::list_active(&state.pool, FEATURED_LIST_LIMIT).await?
    };
    Ok(ok("Featured projects retrieved successfully", entries))
}

/// POST /api/v1/homepage/featured-projects
pub async fn create_featured(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateFeaturedProject>,
) -> AppResult<(StatusCode, Envelope<FeaturedProject>)> {
    if ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .is_none()
    {
        return Err(FieldErrors::single("project_id", "Selected project does not exist.").into());
    }
    if FeaturedProjectRepo::find_by_project(&state.pool, input.project_id)
        .await?
        .is_some()
    {
        return Err(FieldErrors::single("project_id", "This project is already featured.").into());
    }

    let entry = FeaturedProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = input.project_id,
        admin_id = admin.user_id,
        "Project featured"
    );
    Ok(created("Featured project added successfully", entry))
}

/// GET /api/v1/homepage/featured-projects/{id}
pub async fn get_featured(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<FeaturedProject>> {
    let entry = FeaturedProjectRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|f| admin.is_admin() || f.is_active)
        .ok_or(featured_not_found(id))?;
    Ok(ok("Featured project retrieved successfully", entry))
}

/// PUT /api/v1/homepage/featured-projects/{id}
pub async fn update_featured(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateFeaturedProject>,
) -> AppResult<Envelope<FeaturedProject>> {
    let entry = FeaturedProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(featured_not_found(id))?;
    Ok(ok("Featured project updated successfully", entry))
}

/// DELETE /api/v1/homepage/featured-projects/{id}
pub async fn delete_featured(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<()>> {
    if !FeaturedProjectRepo::delete(&state.pool, id).await? {
        return Err(featured_not_found(id));
    }
    tracing::info!(featured_id = id, admin_id = admin.user_id, "Featured project removed");
    Ok(message("Featured project removed successfully"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn featured_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Featured project",
        id,
    })
}

/// Blank footer contact fields are allowed; filled ones must be well-formed.
fn validate_footer(email: Option<&str>, phone: Option<&str>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
        errors.check("footer_email", validate_email(email));
    }
    if let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) {
        errors.check("footer_phone_number", validate_phone(phone));
    }
    errors.into_result()
}
