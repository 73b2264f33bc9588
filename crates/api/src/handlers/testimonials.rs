//! Handlers for the `/testimonials` resource.
//!
//! Anonymous callers only ever see active, live testimonials. Admins get the
//! full filter set, deleted rows on request and the write operations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use greenhomes_core::bulk::{validate_bulk_ids, TestimonialBulkAction};
use greenhomes_core::error::CoreError;
use greenhomes_core::listing::{parse_flag, PageMeta, PageRequest, SortKey};
use greenhomes_core::testimonial::{
    validate_customer_name, validate_quote, validate_rating, DEFAULT_TESTIMONIAL_PAGE_SIZE,
    DEFAULT_TESTIMONIAL_SORT, TESTIMONIAL_PAGE_SIZES, TESTIMONIAL_SORT_FIELDS,
};
use greenhomes_core::types::DbId;
use greenhomes_core::validation::FieldErrors;
use greenhomes_db::models::testimonial::{
    CreateTestimonial, Testimonial, TestimonialFilter, UpdateTestimonial,
};
use greenhomes_db::repositories::{ProjectRepo, TestimonialRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::OptionalAdmin;
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeDeletedParams;
use crate::response::{created, message, ok, Envelope};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TestimonialListParams {
    pub project: Option<DbId>,
    pub is_active: Option<String>,
    pub verified: Option<String>,
    pub min_rating: Option<i32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct TestimonialBulkRequest {
    pub testimonial_ids: Vec<DbId>,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct TestimonialPage {
    pub testimonials: Vec<Testimonial>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct TestimonialBulkResult {
    pub action: &'static str,
    pub updated_count: u64,
    pub requested_count: usize,
    pub testimonial_ids: Vec<DbId>,
}

/// GET /api/v1/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    AppQuery(params): AppQuery<TestimonialListParams>,
) -> AppResult<Envelope<TestimonialPage>> {
    let filter = if admin.is_admin() {
        TestimonialFilter {
            project_id: params.project,
            is_active: parse_flag(params.is_active.as_deref()),
            verified: parse_flag(params.verified.as_deref()),
            min_rating: params.min_rating,
            search: params.search,
            include_deleted: params.include_deleted,
        }
    } else {
        TestimonialFilter {
            project_id: params.project,
            is_active: Some(true),
            verified: parse_flag(params.verified.as_deref()),
            min_rating: params.min_rating,
            search: params.search,
            include_deleted: false,
        }
    };
    let sort = SortKey::resolve(
        params.sort_by.as_deref(),
        TESTIMONIAL_SORT_FIELDS,
        DEFAULT_TESTIMONIAL_SORT,
    );
    let page = PageRequest::resolve(
        params.page,
        params.page_size,
        TESTIMONIAL_PAGE_SIZES,
        DEFAULT_TESTIMONIAL_PAGE_SIZE,
    );

    let (testimonials, total) = TestimonialRepo::search(&state.pool, &filter, sort, page).await?;
    Ok(ok(
        "Testimonials retrieved successfully",
        TestimonialPage {
            testimonials,
            pagination: PageMeta::new(total, page),
        },
    ))
}

/// POST /api/v1/testimonials
pub async fn create_testimonial(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateTestimonial>,
) -> AppResult<(StatusCode, Envelope<Testimonial>)> {
    let mut errors = FieldErrors::new();
    errors.check("customer_name", validate_customer_name(&input.customer_name));
    errors.check("quote", validate_quote(&input.quote));
    if let Some(rating) = input.rating {
        errors.check("rating", validate_rating(rating));
    }
    check_project(&state, input.project_id, &mut errors).await?;
    errors.into_result()?;

    let testimonial = TestimonialRepo::create(&state.pool, &input).await?;
    tracing::info!(
        testimonial_id = testimonial.id,
        admin_id = admin.user_id,
        "Testimonial created"
    );
    Ok(created("Testimonial created successfully", testimonial))
}

/// GET /api/v1/testimonials/{id}
pub async fn get_testimonial(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
    AppQuery(params): AppQuery<IncludeDeletedParams>,
) -> AppResult<Envelope<Testimonial>> {
    let found = if admin.is_admin() && params.include_deleted {
        TestimonialRepo::find_by_id_include_deleted(&state.pool, id).await?
    } else {
        TestimonialRepo::find_by_id(&state.pool, id).await?
    };
    let testimonial = found
        .filter(|t| admin.is_admin() || t.is_active)
        .ok_or(not_found(id))?;
    Ok(ok("Testimonial retrieved successfully", testimonial))
}

/// PUT/PATCH /api/v1/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateTestimonial>,
) -> AppResult<Envelope<Testimonial>> {
    let mut errors = FieldErrors::new();
    if let Some(ref name) = input.customer_name {
        errors.check("customer_name", validate_customer_name(name));
    }
    if let Some(ref quote) = input.quote {
        errors.check("quote", validate_quote(quote));
    }
    if let Some(rating) = input.rating {
        errors.check("rating", validate_rating(rating));
    }
    check_project(&state, input.project_id, &mut errors).await?;
    errors.into_result()?;

    let testimonial = TestimonialRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    tracing::info!(testimonial_id = id, admin_id = admin.user_id, "Testimonial updated");
    Ok(ok("Testimonial updated successfully", testimonial))
}

/// DELETE /api/v1/testimonials/{id}
pub async fn delete_testimonial(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<()>> {
    if !TestimonialRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(testimonial_id = id, admin_id = admin.user_id, "Testimonial deleted");
    Ok(message("Testimonial deleted successfully"))
}

/// POST /api/v1/testimonials/{id}/restore
pub async fn restore_testimonial(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<Testimonial>> {
    let testimonial = TestimonialRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    if !testimonial.is_deleted {
        return Err(AppError::Core(CoreError::Validation(
            "Testimonial is not deleted".into(),
        )));
    }

    TestimonialRepo::restore(&state.pool, id).await?;
    tracing::info!(testimonial_id = id, admin_id = admin.user_id, "Testimonial restored");

    let testimonial = TestimonialRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(ok("Testimonial restored successfully", testimonial))
}

/// POST /api/v1/testimonials/bulk-action
pub async fn bulk_action(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<TestimonialBulkRequest>,
) -> AppResult<Envelope<TestimonialBulkResult>> {
    let mut ids = input.testimonial_ids;
    ids.sort_unstable();
    ids.dedup();

    let mut errors = FieldErrors::new();
    errors.check("testimonial_ids", validate_bulk_ids(&ids));
    let action = match TestimonialBulkAction::parse(&input.action) {
        Ok(action) => Some(action),
        Err(action_errors) => {
            errors.merge(action_errors);
            None
        }
    };
    errors.into_result()?;
    let Some(action) = action else {
        return Err(AppError::BadRequest("Invalid action".into()));
    };

    let deleted_scope = action == TestimonialBulkAction::Restore;
    if TestimonialRepo::count_in_scope(&state.pool, &ids, deleted_scope).await? == 0 {
        return Err(AppError::NotFound("No testimonials found".into()));
    }

    let pool = &state.pool;
    let updated_count = match action {
        TestimonialBulkAction::Delete => TestimonialRepo::bulk_soft_delete(pool, &ids).await?,
        TestimonialBulkAction::Restore => TestimonialRepo::bulk_restore(pool, &ids).await?,
        TestimonialBulkAction::Activate => TestimonialRepo::bulk_set_active(pool, &ids, true).await?,
        TestimonialBulkAction::Deactivate => {
            TestimonialRepo::bulk_set_active(pool, &ids, false).await?
        }
        TestimonialBulkAction::Verify => TestimonialRepo::bulk_set_verified(pool, &ids, true).await?,
        TestimonialBulkAction::Unverify => {
            TestimonialRepo::bulk_set_verified(pool, &ids, false).await?
        }
    };

    tracing::info!(
        action = action.name(),
        requested = ids.len(),
        updated = updated_count,
        admin_id = admin.user_id,
        "Testimonial bulk action applied"
    );

    Ok(ok(
        format!("{updated_count} testimonial(s) updated"),
        TestimonialBulkResult {
            action: action.name(),
            updated_count,
            requested_count: ids.len(),
            testimonial_ids: ids,
        },
    ))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Testimonial",
        id,
    })
}

async fn check_project(
    state: &AppState,
    project_id: Option<DbId>,
    errors: &mut FieldErrors,
) -> AppResult<()> {
    if let Some(project_id) = project_id {
        if ProjectRepo::find_by_id(&state.pool, project_id).await?.is_none() {
            errors.add("project_id", "Selected project does not exist.");
        }
    }
    Ok(())
}
