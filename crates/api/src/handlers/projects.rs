//! Handlers for the `/projects` resource and its gallery / floor-plan
//! child collections.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use greenhomes_core::bulk::{validate_bulk_ids, ProjectBulkAction};
use greenhomes_core::error::CoreError;
use greenhomes_core::listing::{parse_flag, PageMeta, PageRequest, SortKey};
use greenhomes_core::project::{
    validate_amenities, validate_configurations, validate_project_status, validate_title,
    CatalogEntry, DEFAULT_PROJECT_PAGE_SIZE, DEFAULT_PROJECT_SORT, PROJECT_AMENITIES,
    PROJECT_CONFIGURATIONS, PROJECT_PAGE_SIZES, PROJECT_SORT_FIELDS,
};
use greenhomes_core::types::DbId;
use greenhomes_core::validation::{validate_optional_url, FieldErrors};
use greenhomes_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use greenhomes_db::models::project_media::{
    CreateFloorPlan, CreateGalleryImage, FloorPlan, GalleryImage, UpdateFloorPlan,
    UpdateGalleryImage,
};
use greenhomes_db::repositories::{
    FeaturedProjectRepo, FloorPlanRepo, GalleryImageRepo, LeadRepo, ProjectRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::OptionalAdmin;
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeDeletedParams;
use crate::response::{created, message, ok, Envelope};
use crate::state::AppState;

const RERA_TAKEN: &str = "A project with this RERA number already exists.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub is_featured: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProjectBulkRequest {
    pub project_ids: Vec<DbId>,
    pub action: String,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub pagination: PageMeta,
}

/// A project with its live gallery and floor plans.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub gallery_images: Vec<GalleryImage>,
    pub floor_plans: Vec<FloorPlan>,
}

#[derive(Debug, Serialize)]
pub struct ProjectBulkResult {
    pub action: &'static str,
    pub updated_count: u64,
    pub requested_count: usize,
    pub project_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    AppQuery(params): AppQuery<ProjectListParams>,
) -> AppResult<Envelope<ProjectPage>> {
    let filter = ProjectFilter {
        status: params.status,
        is_featured: parse_flag(params.is_featured.as_deref()),
        search: params.search,
        include_deleted: params.include_deleted && admin.is_admin(),
    };
    let sort = SortKey::resolve_with_order(
        params.sort_by.as_deref(),
        params.sort_order.as_deref(),
        PROJECT_SORT_FIELDS,
        DEFAULT_PROJECT_SORT,
    );
    let page = PageRequest::resolve(
        params.page,
        params.page_size,
        PROJECT_PAGE_SIZES,
        DEFAULT_PROJECT_PAGE_SIZE,
    );

    let (projects, total) = ProjectRepo::search(&state.pool, &filter, sort, page).await?;
    Ok(ok(
        "Projects retrieved successfully",
        ProjectPage {
            projects,
            pagination: PageMeta::new(total, page),
        },
    ))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Envelope<ProjectDetail>)> {
    let mut errors = FieldErrors::new();
    errors.check("title", validate_title(&input.title));
    if input.rera_number.trim().is_empty() {
        errors.add("rera_number", "RERA number is required.");
    } else if ProjectRepo::rera_number_taken(&state.pool, &input.rera_number, None).await? {
        errors.add("rera_number", RERA_TAKEN);
    }
    if let Some(ref status) = input.status {
        errors.check("status", validate_project_status(status));
    }
    if input.hero_image_url.trim().is_empty() {
        errors.add("hero_image_url", "Hero image is required.");
    }
    if let Some(ref url) = input.brochure_url {
        errors.check("brochure_url", validate_optional_url(url));
    }
    errors.check("configurations", validate_configurations(&input.configurations));
    errors.check("amenities", validate_amenities(&input.amenities));
    errors.into_result()?;

    let project = ProjectRepo::create(&state.pool, &input, Some(admin.user_id)).await?;
    if input.is_featured {
        FeaturedProjectRepo::feature(&state.pool, project.id).await?;
    }

    tracing::info!(project_id = project.id, admin_id = admin.user_id, "Project created");
    let detail = load_detail(&state, project.id, false).await?;
    Ok(created("Project created successfully", detail))
}

/// GET /api/v1/projects/{id}
///
/// Public reads bump the view counter; admin reads do not.
pub async fn get_project(
    State(state): State<AppState>,
    admin: OptionalAdmin,
    Path(id): Path<DbId>,
    AppQuery(params): AppQuery<IncludeDeletedParams>,
) -> AppResult<Envelope<ProjectDetail>> {
    let include_deleted = params.include_deleted && admin.is_admin();
    if !admin.is_admin() {
        ProjectRepo::increment_view_count(&state.pool, id).await?;
    }
    let detail = load_detail(&state, id, include_deleted).await?;
    Ok(ok("Project retrieved successfully", detail))
}

/// PUT/PATCH /api/v1/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Envelope<ProjectDetail>> {
    ensure_project(&state, id).await?;

    let mut errors = FieldErrors::new();
    if let Some(ref title) = input.title {
        errors.check("title", validate_title(title));
    }
    if let Some(ref rera) = input.rera_number {
        if rera.trim().is_empty() {
            errors.add("rera_number", "RERA number is required.");
        } else if ProjectRepo::rera_number_taken(&state.pool, rera, Some(id)).await? {
            errors.add("rera_number", RERA_TAKEN);
        }
    }
    if let Some(ref status) = input.status {
        errors.check("status", validate_project_status(status));
    }
    if let Some(ref url) = input.hero_image_url {
        if url.trim().is_empty() {
            errors.add("hero_image_url", "Hero image is required.");
        }
    }
    if let Some(ref url) = input.brochure_url {
        errors.check("brochure_url", validate_optional_url(url));
    }
    if let Some(ref configurations) = input.configurations {
        errors.check("configurations", validate_configurations(configurations));
    }
    if let Some(ref amenities) = input.amenities {
        errors.check("amenities", validate_amenities(amenities));
    }
    errors.into_result()?;

    ProjectRepo::update(&state.pool, id, &input, Some(admin.user_id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    match input.is_featured {
        Some(true) => FeaturedProjectRepo::feature(&state.pool, id).await?,
        Some(false) => {
            FeaturedProjectRepo::unfeature(&state.pool, id).await?;
        }
        None => {}
    }

    tracing::info!(project_id = id, admin_id = admin.user_id, "Project updated");
    let detail = load_detail(&state, id, false).await?;
    Ok(ok("Project updated successfully", detail))
}

/// DELETE /api/v1/projects/{id}
///
/// Refused while active leads still reference the project.
pub async fn delete_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<()>> {
    ensure_project(&state, id).await?;

    let lead_count = LeadRepo::count_for_project(&state.pool, id).await?;
    if lead_count > 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot delete project with {lead_count} active lead(s). \
             Reassign or delete the leads first."
        ))));
    }

    ProjectRepo::soft_delete(&state.pool, id).await?;
    tracing::info!(project_id = id, admin_id = admin.user_id, "Project deleted");
    Ok(message("Project deleted successfully"))
}

/// POST /api/v1/projects/{id}/restore
pub async fn restore_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<ProjectDetail>> {
    let project = ProjectRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    if !project.is_deleted {
        return Err(AppError::Core(CoreError::Validation(
            "Project is not deleted".into(),
        )));
    }
    if ProjectRepo::rera_number_taken(&state.pool, &project.rera_number, Some(id)).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Another active project already uses this RERA number".into(),
        )));
    }

    ProjectRepo::restore(&state.pool, id).await?;
    tracing::info!(project_id = id, admin_id = admin.user_id, "Project restored");

    let detail = load_detail(&state, id, false).await?;
    Ok(ok("Project restored successfully", detail))
}

/// POST /api/v1/projects/{id}/clone
pub async fn clone_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Envelope<ProjectDetail>)> {
    let source = ensure_project(&state, id).await?;
    let copy = ProjectRepo::clone_project(&state.pool, &source, Some(admin.user_id)).await?;

    tracing::info!(
        source_id = id,
        project_id = copy.id,
        admin_id = admin.user_id,
        "Project cloned"
    );
    let detail = load_detail(&state, copy.id, false).await?;
    Ok(created(
        format!("Project '{}' cloned successfully", source.title),
        detail,
    ))
}

/// POST /api/v1/projects/bulk-action
pub async fn bulk_action(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<ProjectBulkRequest>,
) -> AppResult<Envelope<ProjectBulkResult>> {
    let mut ids = input.project_ids;
    ids.sort_unstable();
    ids.dedup();

    let mut errors = FieldErrors::new();
    errors.check("project_ids", validate_bulk_ids(&ids));
    let action = match ProjectBulkAction::parse(&input.action, input.status.as_deref()) {
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

    let deleted_scope = matches!(action, ProjectBulkAction::Restore);
    if ProjectRepo::count_in_scope(&state.pool, &ids, deleted_scope).await? == 0 {
        return Err(AppError::NotFound("No projects found".into()));
    }

    let pool = &state.pool;
    let updated_count = match &action {
        ProjectBulkAction::Delete => ProjectRepo::bulk_soft_delete(pool, &ids).await?,
        ProjectBulkAction::Restore => ProjectRepo::bulk_restore(pool, &ids).await?,
        ProjectBulkAction::ChangeStatus(status) => {
            ProjectRepo::bulk_set_status(pool, &ids, status).await?
        }
        ProjectBulkAction::Feature => {
            let active = ProjectRepo::active_ids(pool, &ids).await?;
            for project_id in &active {
                FeaturedProjectRepo::feature(pool, *project_id).await?;
            }
            active.len() as u64
        }
        ProjectBulkAction::Unfeature => {
            let active = ProjectRepo::active_ids(pool, &ids).await?;
            for project_id in &active {
                FeaturedProjectRepo::unfeature(pool, *project_id).await?;
            }
            active.len() as u64
        }
    };

    tracing::info!(
        action = action.name(),
        requested = ids.len(),
        updated = updated_count,
        admin_id = admin.user_id,
        "Project bulk action applied"
    );

    Ok(ok(
        format!("{updated_count} project(s) updated"),
        ProjectBulkResult {
            action: action.name(),
            updated_count,
            requested_count: ids.len(),
            project_ids: ids,
        },
    ))
}

/// GET /api/v1/projects/configurations
pub async fn configurations() -> Envelope<&'static [CatalogEntry]> {
    ok("Configurations retrieved successfully", PROJECT_CONFIGURATIONS)
}

/// GET /api/v1/projects/amenities
pub async fn amenities() -> Envelope<&'static [CatalogEntry]> {
    ok("Amenities retrieved successfully", PROJECT_AMENITIES)
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/gallery
pub async fn list_gallery(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(project_id): Path<DbId>,
) -> AppResult<Envelope<Vec<GalleryImage>>> {
    ensure_project(&state, project_id).await?;
    let images = GalleryImageRepo::list_for_project(&state.pool, project_id).await?;
    Ok(ok("Gallery images retrieved successfully", images))
}

/// POST /api/v1/projects/{id}/gallery
pub async fn add_gallery_image(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateGalleryImage>,
) -> AppResult<(StatusCode, Envelope<GalleryImage>)> {
    ensure_project(&state, project_id).await?;
    if input.image_url.trim().is_empty() {
        return Err(FieldErrors::single("image_url", "Image is required.").into());
    }
    let image = GalleryImageRepo::create(&state.pool, project_id, &input).await?;
    Ok(created("Gallery image added successfully", image))
}

/// PUT /api/v1/projects/{id}/gallery/{image_id}
pub async fn update_gallery_image(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateGalleryImage>,
) -> AppResult<Envelope<GalleryImage>> {
    ensure_project(&state, project_id).await?;
    if matches!(input.image_url.as_deref(), Some(url) if url.trim().is_empty()) {
        return Err(FieldErrors::single("image_url", "Image is required.").into());
    }
    let image = GalleryImageRepo::update(&state.pool, project_id, image_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery image",
            id: image_id,
        }))?;
    Ok(ok("Gallery image updated successfully", image))
}

/// DELETE /api/v1/projects/{id}/gallery/{image_id}
pub async fn delete_gallery_image(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    ensure_project(&state, project_id).await?;
    if !GalleryImageRepo::soft_delete(&state.pool, project_id, image_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Gallery image",
            id: image_id,
        }));
    }
    Ok(message("Gallery image deleted successfully"))
}

// ---------------------------------------------------------------------------
// Floor plans
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/floor-plans
pub async fn list_floor_plans(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(project_id): Path<DbId>,
) -> AppResult<Envelope<Vec<FloorPlan>>> {
    ensure_project(&state, project_id).await?;
    let plans = FloorPlanRepo::list_for_project(&state.pool, project_id).await?;
    Ok(ok("Floor plans retrieved successfully", plans))
}

/// POST /api/v1/projects/{id}/floor-plans
pub async fn add_floor_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateFloorPlan>,
) -> AppResult<(StatusCode, Envelope<FloorPlan>)> {
    ensure_project(&state, project_id).await?;
    let mut errors = FieldErrors::new();
    if input.title.trim().is_empty() {
        errors.add("title", "Title is required.");
    }
    if input.file_url.trim().is_empty() {
        errors.add("file_url", "File is required.");
    }
    errors.into_result()?;

    let plan = FloorPlanRepo::create(&state.pool, project_id, &input).await?;
    Ok(created("Floor plan added successfully", plan))
}

/// PUT /api/v1/projects/{id}/floor-plans/{plan_id}
pub async fn update_floor_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((project_id, plan_id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateFloorPlan>,
) -> AppResult<Envelope<FloorPlan>> {
    ensure_project(&state, project_id).await?;
    let mut errors = FieldErrors::new();
    if matches!(input.title.as_deref(), Some(t) if t.trim().is_empty()) {
        errors.add("title", "Title is required.");
    }
    if matches!(input.file_url.as_deref(), Some(u) if u.trim().is_empty()) {
        errors.add("file_url", "File is required.");
    }
    errors.into_result()?;

    let plan = FloorPlanRepo::update(&state.pool, project_id, plan_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Floor plan",
            id: plan_id,
        }))?;
    Ok(ok("Floor plan updated successfully", plan))
}

/// DELETE /api/v1/projects/{id}/floor-plans/{plan_id}
pub async fn delete_floor_plan(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((project_id, plan_id)): Path<(DbId, DbId)>,
) -> AppResult<Envelope<()>> {
    ensure_project(&state, project_id).await?;
    if !FloorPlanRepo::soft_delete(&state.pool, project_id, plan_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Floor plan",
            id: plan_id,
        }));
    }
    Ok(message("Floor plan deleted successfully"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The active project with this id, or 404.
async fn ensure_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

async fn load_detail(state: &AppState, id: DbId, include_deleted: bool) -> AppResult<ProjectDetail> {
    let project = if include_deleted {
        ProjectRepo::find_by_id_include_deleted(&state.pool, id).await?
    } else {
        ProjectRepo::find_by_id(&state.pool, id).await?
    }
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    }))?;

    let gallery_images = GalleryImageRepo::list_for_project(&state.pool, id).await?;
    let floor_plans = FloorPlanRepo::list_for_project(&state.pool, id).await?;
    Ok(ProjectDetail {
        project,
        gallery_images,
        floor_plans,
    })
}
