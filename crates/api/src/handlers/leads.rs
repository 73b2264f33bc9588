//! Handlers for the `/leads` resource.
//!
//! Leads arrive anonymously through the public contact form and are then
//! worked by admins: status moves, notes, follow-ups, soft delete and
//! bulk operations. Every write path that can move a lead into `contacted`
//! goes through the repository's locked transition so the contact
//! bookkeeping is applied exactly once.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use greenhomes_core::bulk::{validate_bulk_ids, LeadBulkAction};
use greenhomes_core::error::CoreError;
use greenhomes_core::lead::{
    format_note_entry, is_overdue, period_starts, priority_color, rate, status_color, time_ago,
    validate_contact_method, validate_message, validate_name, validate_note, validate_priority,
    validate_source, validate_status, DEFAULT_LEAD_PAGE_SIZE, DEFAULT_LEAD_SORT, LEAD_PAGE_SIZES,
    LEAD_SORT_FIELDS,
};
use greenhomes_core::listing::{PageMeta, PageRequest, SortKey};
use greenhomes_core::types::{DbId, Timestamp};
use greenhomes_core::validation::{validate_email, validate_future, validate_phone, FieldErrors};
use greenhomes_db::models::lead::{
    CreateLead, Lead, LeadFilter, LeadWithRelations, StatusChange, UpdateLead,
};
use greenhomes_db::repositories::{AdminUserRepo, LeadRepo, ProjectRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, message, ok, Envelope};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub project: Option<DbId>,
    pub contacted_by: Option<DbId>,
    pub search: Option<String>,
    pub overdue_only: Option<bool>,
    pub include_deleted: Option<bool>,
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Body of `PUT`/`PATCH /leads/{id}`. `notes` is accepted only to be refused.
#[derive(Debug, Deserialize)]
pub struct UpdateLeadRequest {
    #[serde(flatten)]
    pub changes: UpdateLead,
    pub notes: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
    pub notes: Option<String>,
    pub next_follow_up: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
    pub next_follow_up: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
pub struct LeadBulkRequest {
    pub lead_ids: Vec<DbId>,
    pub action: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub contacted_by: Option<DbId>,
}

/// A lead with its relations and the display fields the admin UI renders.
#[derive(Debug, Serialize)]
pub struct LeadView {
    #[serde(flatten)]
    pub lead: LeadWithRelations,
    pub status_color: &'static str,
    pub priority_color: &'static str,
    pub time_ago: String,
    pub is_overdue: bool,
}

impl LeadView {
    pub fn new(lead: LeadWithRelations, now: Timestamp) -> Self {
        Self {
            status_color: status_color(&lead.lead.status),
            priority_color: priority_color(&lead.lead.priority),
            time_ago: time_ago(lead.lead.created_at, now),
            is_overdue: is_overdue(lead.lead.next_follow_up, now),
            lead,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeadPage {
    pub leads: Vec<LeadView>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct LeadStatistics {
    pub total_leads: i64,
    pub new_leads: i64,
    pub contacted_leads: i64,
    pub qualified_leads: i64,
    pub closed_leads: i64,
    pub contact_rate: f64,
    pub qualification_rate: f64,
    pub close_rate: f64,
    pub urgent_leads: i64,
    pub high_priority_leads: i64,
    pub medium_priority_leads: i64,
    pub low_priority_leads: i64,
    pub leads_with_follow_up: i64,
    pub overdue_follow_ups: i64,
    pub source_breakdown: BTreeMap<String, i64>,
    pub leads_today: i64,
    pub leads_this_week: i64,
    pub leads_this_month: i64,
}

#[derive(Debug, Serialize)]
pub struct BulkResult {
    pub action: &'static str,
    pub updated_count: u64,
    pub requested_count: usize,
    pub lead_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// POST /api/v1/leads
///
/// Public contact-form submission. New leads start as `new` / `medium`.
pub async fn create_lead(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateLead>,
) -> AppResult<(StatusCode, Envelope<Lead>)> {
    let mut errors = FieldErrors::new();
    errors.check("name", validate_name(&input.name));
    errors.check("email", validate_email(input.email.trim()));
    errors.check("phone", validate_phone(&input.phone));
    errors.check("message", validate_message(&input.message));
    if let Some(ref source) = input.source {
        errors.check("source", validate_source(source));
    }
    if let Some(ref method) = input.preferred_contact_method {
        errors.check("preferred_contact_method", validate_contact_method(method));
    }
    check_project(&state, input.project_id, &mut errors).await?;
    errors.into_result()?;

    let lead = LeadRepo::create(&state.pool, &input).await?;
    tracing::info!(lead_id = lead.id, source = %lead.source, "New lead received");

    Ok(created(
        "Thank you for your interest! We will contact you soon.",
        lead,
    ))
}

// ---------------------------------------------------------------------------
// Admin reads
// ---------------------------------------------------------------------------

/// GET /api/v1/leads
pub async fn list_leads(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<LeadListParams>,
) -> AppResult<Envelope<LeadPage>> {
    let filter = LeadFilter {
        status: params.status,
        priority: params.priority,
        source: params.source,
        project_id: params.project,
        contacted_by: params.contacted_by,
        search: params.search,
        overdue_only: params.overdue_only.unwrap_or(false),
        include_deleted: params.include_deleted.unwrap_or(false),
    };
    let sort = SortKey::resolve(params.sort_by.as_deref(), LEAD_SORT_FIELDS, DEFAULT_LEAD_SORT);
    let page = PageRequest::resolve(
        params.page,
        params.page_size,
        LEAD_PAGE_SIZES,
        DEFAULT_LEAD_PAGE_SIZE,
    );

    let (rows, total) = LeadRepo::search(&state.pool, &filter, sort, page).await?;
    let now = Utc::now();

    Ok(ok(
        "Leads retrieved successfully",
        LeadPage {
            leads: rows.into_iter().map(|l| LeadView::new(l, now)).collect(),
            pagination: PageMeta::new(total, page),
        },
    ))
}

/// GET /api/v1/leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<LeadView>> {
    let view = load_view(&state, id).await?;
    Ok(ok("Lead retrieved successfully", view))
}

/// GET /api/v1/leads/statistics
pub async fn lead_statistics(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Envelope<LeadStatistics>> {
    let (today, week, month) = period_starts(Utc::now());
    let counts = LeadRepo::counts(&state.pool, today, week, month).await?;
    let sources = LeadRepo::count_by_source(&state.pool).await?;

    Ok(ok(
        "Lead statistics retrieved successfully",
        LeadStatistics {
            total_leads: counts.total,
            new_leads: counts.new,
            contacted_leads: counts.contacted,
            qualified_leads: counts.qualified,
            closed_leads: counts.closed,
            contact_rate: rate(counts.contacted, counts.total),
            qualification_rate: rate(counts.qualified, counts.total),
            close_rate: rate(counts.closed, counts.total),
            urgent_leads: counts.urgent,
            high_priority_leads: counts.high,
            medium_priority_leads: counts.medium,
            low_priority_leads: counts.low,
            leads_with_follow_up: counts.with_follow_up,
            overdue_follow_ups: counts.overdue_follow_ups,
            source_breakdown: sources.into_iter().map(|s| (s.key, s.count)).collect(),
            leads_today: counts.today,
            leads_this_week: counts.this_week,
            leads_this_month: counts.this_month,
        },
    ))
}

// ---------------------------------------------------------------------------
// Admin writes
// ---------------------------------------------------------------------------

/// PUT/PATCH /api/v1/leads/{id}
///
/// Partial update. Notes cannot be replaced here; use the notes endpoint.
pub async fn update_lead(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateLeadRequest>,
) -> AppResult<Envelope<LeadView>> {
    let now = Utc::now();
    let changes = input.changes;

    let mut errors = FieldErrors::new();
    if input.notes.is_some() {
        errors.add(
            "notes",
            "Notes cannot be replaced. Use the add-note endpoint instead.",
        );
    }
    if let Some(ref name) = changes.name {
        errors.check("name", validate_name(name));
    }
    if let Some(ref email) = changes.email {
        errors.check("email", validate_email(email.trim()));
    }
    if let Some(ref phone) = changes.phone {
        errors.check("phone", validate_phone(phone));
    }
    if let Some(ref msg) = changes.message {
        errors.check("message", validate_message(msg));
    }
    if let Some(ref status) = changes.status {
        errors.check("status", validate_status(status));
    }
    if let Some(ref priority) = changes.priority {
        errors.check("priority", validate_priority(priority));
    }
    if let Some(ref source) = changes.source {
        errors.check("source", validate_source(source));
    }
    if let Some(ref method) = changes.preferred_contact_method {
        errors.check("preferred_contact_method", validate_contact_method(method));
    }
    if let Some(at) = changes.next_follow_up {
        errors.check("next_follow_up", validate_future(at, now));
    }
    check_project(&state, changes.project_id, &mut errors).await?;
    errors.into_result()?;

    LeadRepo::update(&state.pool, id, &changes, Some(admin.user_id), now)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    tracing::info!(lead_id = id, admin_id = admin.user_id, "Lead updated");
    let view = load_view(&state, id).await?;
    Ok(ok("Lead updated successfully", view))
}

/// DELETE /api/v1/leads/{id}
pub async fn delete_lead(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<()>> {
    if !LeadRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Lead", id }));
    }
    tracing::info!(lead_id = id, admin_id = admin.user_id, "Lead deleted");
    Ok(message("Lead deleted successfully"))
}

/// POST /api/v1/leads/{id}/restore
pub async fn restore_lead(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Envelope<LeadView>> {
    let lead = LeadRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;
    if !lead.is_deleted {
        return Err(AppError::Core(CoreError::Validation(
            "Lead is not deleted".into(),
        )));
    }

    LeadRepo::restore(&state.pool, id).await?;
    tracing::info!(lead_id = id, admin_id = admin.user_id, "Lead restored");

    let view = load_view(&state, id).await?;
    Ok(ok("Lead restored successfully", view))
}

/// POST /api/v1/leads/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<StatusRequest>,
) -> AppResult<Envelope<LeadView>> {
    let now = Utc::now();

    let mut errors = FieldErrors::new();
    errors.check("status", validate_status(&input.status));
    if let Some(at) = input.next_follow_up {
        errors.check("next_follow_up", validate_future(at, now));
    }
    errors.into_result()?;

    let change = StatusChange {
        status: input.status,
        note: input.notes,
        next_follow_up: input.next_follow_up,
        actor_id: Some(admin.user_id),
        at: now,
    };
    let (lead, old_status) = LeadRepo::change_status(&state.pool, id, &change)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    tracing::info!(
        lead_id = id,
        admin_id = admin.user_id,
        from = %old_status,
        to = %lead.status,
        "Lead status changed"
    );
    let view = load_view(&state, id).await?;
    Ok(ok(
        format!("Lead status updated from '{old_status}' to '{}'", lead.status),
        view,
    ))
}

/// POST /api/v1/leads/{id}/notes
///
/// Appends `[timestamp] <admin name>: <note>` to the lead's notes.
pub async fn add_note(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<NoteRequest>,
) -> AppResult<Envelope<LeadView>> {
    let now = Utc::now();

    let mut errors = FieldErrors::new();
    errors.check("note", validate_note(&input.note));
    if let Some(at) = input.next_follow_up {
        errors.check("next_follow_up", validate_future(at, now));
    }
    errors.into_result()?;

    let author = AdminUserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .map(|u| u.full_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Admin #{}", admin.user_id));

    let entry = format_note_entry(now, &author, input.note.trim());
    LeadRepo::append_note(&state.pool, id, &entry, input.next_follow_up)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;

    let view = load_view(&state, id).await?;
    Ok(ok("Note added successfully", view))
}

/// POST /api/v1/leads/bulk-action
///
/// Ids outside the action's scope are skipped; `updated_count` reports how
/// many rows actually changed.
pub async fn bulk_action(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<LeadBulkRequest>,
) -> AppResult<Envelope<BulkResult>> {
    let mut ids = input.lead_ids;
    ids.sort_unstable();
    ids.dedup();

    let mut errors = FieldErrors::new();
    errors.check("lead_ids", validate_bulk_ids(&ids));
    let action = match LeadBulkAction::parse(
        &input.action,
        input.status.as_deref(),
        input.priority.as_deref(),
        input.contacted_by,
    ) {
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

    if let LeadBulkAction::AssignContact(admin_id) = action {
        if !AdminUserRepo::exists_active(&state.pool, admin_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "AdminUser",
                id: admin_id,
            }));
        }
    }

    let deleted_scope = matches!(action, LeadBulkAction::Restore);
    if LeadRepo::count_in_scope(&state.pool, &ids, deleted_scope).await? == 0 {
        return Err(AppError::NotFound("No leads found".into()));
    }

    let pool = &state.pool;
    let updated_count = match &action {
        LeadBulkAction::Delete => LeadRepo::bulk_soft_delete(pool, &ids).await?,
        LeadBulkAction::Restore => LeadRepo::bulk_restore(pool, &ids).await?,
        LeadBulkAction::ChangeStatus(status) => LeadRepo::bulk_set_status(pool, &ids, status).await?,
        LeadBulkAction::ChangePriority(priority) => {
            LeadRepo::bulk_set_priority(pool, &ids, priority).await?
        }
        LeadBulkAction::AssignContact(admin_id) => {
            LeadRepo::bulk_assign_contact(pool, &ids, *admin_id).await?
        }
    };

    tracing::info!(
        action = action.name(),
        requested = ids.len(),
        updated = updated_count,
        admin_id = admin.user_id,
        "Lead bulk action applied"
    );

    Ok(ok(
        format!("{updated_count} lead(s) updated"),
        BulkResult {
            action: action.name(),
            updated_count,
            requested_count: ids.len(),
            lead_ids: ids,
        },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_view(state: &AppState, id: DbId) -> AppResult<LeadView> {
    let lead = LeadRepo::find_with_relations(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lead", id }))?;
    Ok(LeadView::new(lead, Utc::now()))
}

/// Record a field error when `project_id` names no active project.
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
