//! Repository for the `leads` table.
//!
//! Reads default to the active scope (`is_deleted = false`); the
//! `*_include_deleted` variants and `LeadFilter::include_deleted` address every
//! row. Status transitions run inside a transaction that locks the row, so the
//! "became contacted" side effects are applied at most once per transition.

use chrono::Utc;
use greenhomes_core::lead::{enters_contacted, format_status_change_note};
use greenhomes_core::listing::{search_pattern, PageRequest, SortKey};
use greenhomes_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::lead::{
    CreateLead, KeyCount, Lead, LeadCounts, LeadFilter, LeadWithRelations, StatusChange,
    UpdateLead,
};
use crate::query::{bind_values, bind_values_scalar, BindValue, FilterBuilder};

/// Column list for `RETURNING` clauses.
const COLUMNS: &str = "id, name, email, phone, project_id, message, status, priority, source, \
                       preferred_contact_method, next_follow_up, follow_up_count, contacted_at, \
                       contacted_by, notes, is_deleted, deleted_at, created_at, updated_at";

/// Column list for joined reads, `leads` aliased as `l`.
const JOINED_COLUMNS: &str = "l.id, l.name, l.email, l.phone, l.project_id, l.message, l.status, \
    l.priority, l.source, l.preferred_contact_method, l.next_follow_up, l.follow_up_count, \
    l.contacted_at, l.contacted_by, l.notes, l.is_deleted, l.deleted_at, l.created_at, \
    l.updated_at, p.title AS project_title, p.location AS project_location, \
    a.full_name AS contacted_by_name, a.email AS contacted_by_email";

const JOINS: &str = "FROM leads l \
    LEFT JOIN projects p ON p.id = l.project_id \
    LEFT JOIN admin_users a ON a.id = l.contacted_by";

/// Text columns matched by the free-text search.
const SEARCH_COLUMNS: &[&str] = &["l.name", "l.email", "l.phone", "l.message", "p.title"];

/// Provides CRUD and workflow operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead with status `new` and priority `medium`.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, email, phone, project_id, message, source, preferred_contact_method)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'contact_form'), COALESCE($7, 'any'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.phone.trim())
            .bind(input.project_id)
            .bind(input.message.trim())
            .bind(&input.source)
            .bind(&input.preferred_contact_method)
            .fetch_one(pool)
            .await
    }

    /// Find an active lead by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a lead by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active lead with its project and contact attribution.
    pub async fn find_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LeadWithRelations>, sqlx::Error> {
        let query =
            format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE l.id = $1 AND l.is_deleted = false");
        sqlx::query_as::<_, LeadWithRelations>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filter, search, sort and paginate leads.
    ///
    /// Returns the requested page and the total number of matching rows.
    pub async fn search(
        pool: &PgPool,
        filter: &LeadFilter,
        sort: SortKey,
        page: PageRequest,
    ) -> Result<(Vec<LeadWithRelations>, i64), sqlx::Error> {
        let builder = build_lead_filter(filter);
        let where_clause = builder.where_clause();

        let count_query = format!("SELECT COUNT(*)::BIGINT {JOINS} {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), builder.values())
            .fetch_one(pool)
            .await?;

        let limit_idx = builder.next_idx();
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS} {where_clause} \
             ORDER BY {}, l.id DESC \
             LIMIT ${limit_idx} OFFSET ${}",
            sort.to_sql(),
            limit_idx + 1
        );
        let rows = bind_values(sqlx::query_as::<_, LeadWithRelations>(&query), builder.values())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Most recently created active leads.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<LeadWithRelations>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS} WHERE l.is_deleted = false \
             ORDER BY l.created_at DESC, l.id DESC LIMIT $1"
        );
        sqlx::query_as::<_, LeadWithRelations>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin edit. Only non-`None` fields in `input` are applied.
    ///
    /// A status change into `contacted` stamps `contacted_at = at`, credits
    /// `actor_id` and bumps `follow_up_count`. Returns `None` if no active
    /// lead with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
        actor_id: Option<DbId>,
        at: Timestamp,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(old_status) = lock_status(&mut tx, id).await? else {
            return Ok(None);
        };
        let contacted = input
            .status
            .as_deref()
            .is_some_and(|new| enters_contacted(&old_status, new));

        let query = format!(
            "UPDATE leads SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                project_id = COALESCE($5, project_id),
                message = COALESCE($6, message),
                status = COALESCE($7, status),
                priority = COALESCE($8, priority),
                source = COALESCE($9, source),
                preferred_contact_method = COALESCE($10, preferred_contact_method),
                next_follow_up = COALESCE($11, next_follow_up),
                contacted_at = CASE WHEN $12 THEN $14 ELSE contacted_at END,
                contacted_by = CASE WHEN $12 THEN COALESCE($13, contacted_by) ELSE contacted_by END,
                follow_up_count = follow_up_count + CASE WHEN $12 THEN 1 ELSE 0 END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.email.as_deref().map(str::trim))
            .bind(input.phone.as_deref().map(str::trim))
            .bind(input.project_id)
            .bind(input.message.as_deref().map(str::trim))
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.source)
            .bind(&input.preferred_contact_method)
            .bind(input.next_follow_up)
            .bind(contacted)
            .bind(actor_id)
            .bind(at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(lead))
    }

    /// Move a lead to a new status, appending a status-change note when
    /// `change.note` is non-empty.
    ///
    /// Returns the updated lead together with the previous status, or `None`
    /// if no active lead with the given `id` exists.
    pub async fn change_status(
        pool: &PgPool,
        id: DbId,
        change: &StatusChange,
    ) -> Result<Option<(Lead, String)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(old_status) = lock_status(&mut tx, id).await? else {
            return Ok(None);
        };
        let contacted = enters_contacted(&old_status, &change.status);
        let note = change
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format_status_change_note(change.at, &old_status, &change.status, n))
            .unwrap_or_default();

        let query = format!(
            "UPDATE leads SET
                status = $2,
                notes = notes || $3,
                next_follow_up = COALESCE($4, next_follow_up),
                contacted_at = CASE WHEN $5 THEN $7 ELSE contacted_at END,
                contacted_by = CASE WHEN $5 THEN COALESCE($6, contacted_by) ELSE contacted_by END,
                follow_up_count = follow_up_count + CASE WHEN $5 THEN 1 ELSE 0 END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let lead = sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(&change.status)
            .bind(note)
            .bind(change.next_follow_up)
            .bind(contacted)
            .bind(change.actor_id)
            .bind(change.at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((lead, old_status)))
    }

    /// Append a pre-formatted note entry, optionally rescheduling the
    /// follow-up. Existing notes are never overwritten.
    pub async fn append_note(
        pool: &PgPool,
        id: DbId,
        entry: &str,
        next_follow_up: Option<Timestamp>,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                notes = notes || $2,
                next_follow_up = COALESCE($3, next_follow_up)
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(entry)
            .bind(next_follow_up)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a lead by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET is_deleted = true, deleted_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted lead. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET is_deleted = false, deleted_at = NULL
             WHERE id = $1 AND is_deleted = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Bulk operations ----------------------------------------------------
    //
    // Each returns the number of rows actually changed; ids that do not exist
    // or are not in the expected scope are skipped.

    /// How many of `ids` exist in the active (`deleted = false`) or deleted scope.
    pub async fn count_in_scope(
        pool: &PgPool,
        ids: &[DbId],
        deleted: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM leads WHERE id = ANY($1) AND is_deleted = $2",
        )
        .bind(ids)
        .bind(deleted)
        .fetch_one(pool)
        .await
    }

    pub async fn bulk_soft_delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET is_deleted = true, deleted_at = NOW()
             WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_restore(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET is_deleted = false, deleted_at = NULL
             WHERE id = ANY($1) AND is_deleted = true",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Plain status assignment across many leads.
    ///
    /// Unlike [`Self::update`] and [`Self::change_status`], moving leads into
    /// `contacted` here leaves `contacted_at`, `contacted_by` and
    /// `follow_up_count` untouched. A batch has no single acting contact, so
    /// crediting one is done with the `assign_contact` bulk action instead.
    pub async fn bulk_set_status(
        pool: &PgPool,
        ids: &[DbId],
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET status = $2 WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_set_priority(
        pool: &PgPool,
        ids: &[DbId],
        priority: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET priority = $2 WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .bind(priority)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_assign_contact(
        pool: &PgPool,
        ids: &[DbId],
        admin_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET contacted_by = $2 WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .bind(admin_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // -- Statistics ---------------------------------------------------------

    /// Counts over active leads, bucketed by status, priority and period.
    pub async fn counts(
        pool: &PgPool,
        today: Timestamp,
        week_start: Timestamp,
        month_start: Timestamp,
    ) -> Result<LeadCounts, sqlx::Error> {
        sqlx::query_as::<_, LeadCounts>(
            "SELECT
                COUNT(*)::BIGINT AS total,
                COUNT(*) FILTER (WHERE status = 'new')::BIGINT AS new,
                COUNT(*) FILTER (WHERE status = 'contacted')::BIGINT AS contacted,
                COUNT(*) FILTER (WHERE status = 'qualified')::BIGINT AS qualified,
                COUNT(*) FILTER (WHERE status = 'closed')::BIGINT AS closed,
                COUNT(*) FILTER (WHERE priority = 'low')::BIGINT AS low,
                COUNT(*) FILTER (WHERE priority = 'medium')::BIGINT AS medium,
                COUNT(*) FILTER (WHERE priority = 'high')::BIGINT AS high,
                COUNT(*) FILTER (WHERE priority = 'urgent')::BIGINT AS urgent,
                COUNT(*) FILTER (WHERE next_follow_up IS NOT NULL)::BIGINT AS with_follow_up,
                COUNT(*) FILTER (WHERE next_follow_up < NOW())::BIGINT AS overdue_follow_ups,
                COUNT(*) FILTER (WHERE created_at >= $1)::BIGINT AS today,
                COUNT(*) FILTER (WHERE created_at >= $2)::BIGINT AS this_week,
                COUNT(*) FILTER (WHERE created_at >= $3)::BIGINT AS this_month
             FROM leads WHERE is_deleted = false",
        )
        .bind(today)
        .bind(week_start)
        .bind(month_start)
        .fetch_one(pool)
        .await
    }

    /// Active lead counts per source, largest first.
    pub async fn count_by_source(pool: &PgPool) -> Result<Vec<KeyCount>, sqlx::Error> {
        sqlx::query_as::<_, KeyCount>(
            "SELECT source AS key, COUNT(*)::BIGINT AS count
             FROM leads WHERE is_deleted = false
             GROUP BY source ORDER BY count DESC, source",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of active leads still referencing a project.
    pub async fn count_for_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM leads WHERE project_id = $1 AND is_deleted = false",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lock an active lead row and read its current status.
async fn lock_status(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: DbId,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT status FROM leads WHERE id = $1 AND is_deleted = false FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
}

fn build_lead_filter(filter: &LeadFilter) -> FilterBuilder {
    let mut builder = FilterBuilder::new();

    if !filter.include_deleted {
        builder.push_raw("l.is_deleted = false");
    }
    if let Some(ref status) = filter.status {
        builder.push("l.status = {}", BindValue::Text(status.clone()));
    }
    if let Some(ref priority) = filter.priority {
        builder.push("l.priority = {}", BindValue::Text(priority.clone()));
    }
    if let Some(ref source) = filter.source {
        builder.push("l.source = {}", BindValue::Text(source.clone()));
    }
    if let Some(project_id) = filter.project_id {
        builder.push("l.project_id = {}", BindValue::BigInt(project_id));
    }
    if let Some(admin_id) = filter.contacted_by {
        builder.push("l.contacted_by = {}", BindValue::BigInt(admin_id));
    }
    if filter.overdue_only {
        builder.push("l.next_follow_up < {}", BindValue::Timestamp(Utc::now()));
    }
    if let Some(pattern) = search_pattern(filter.search.as_deref()) {
        builder.push_search(SEARCH_COLUMNS, pattern);
    }

    builder
}
