//! Repository for the `projects` table.

use greenhomes_core::listing::{search_pattern, PageRequest, SortKey};
use greenhomes_core::project::{clone_rera_number, clone_title, slugify};
use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::query::{bind_values, bind_values_scalar, BindValue, FilterBuilder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, location, rera_number, description, status, \
                       hero_image_url, brochure_url, configurations, amenities, is_featured, \
                       view_count, created_by, updated_by, is_deleted, deleted_at, \
                       created_at, updated_at";

const SEARCH_COLUMNS: &[&str] = &["title", "location", "rera_number", "description"];

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `is_featured` is only recorded here; the caller creates the matching
    /// featured entry through `FeaturedProjectRepo`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        created_by: Option<DbId>,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, slug, location, rera_number, description, status,
                                   hero_image_url, brochure_url, configurations, amenities,
                                   created_by, updated_by)
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, ''), COALESCE($6, 'upcoming'),
                     $7, COALESCE($8, ''), $9, $10, $11, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.title.trim())
            .bind(slugify(&input.title))
            .bind(&input.location)
            .bind(input.rera_number.trim())
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.hero_image_url)
            .bind(&input.brochure_url)
            .bind(&input.configurations)
            .bind(&input.amenities)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active project other than `exclude_id` already uses this RERA number.
    pub async fn rera_number_taken(
        pool: &PgPool,
        rera_number: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM projects
                WHERE rera_number = $1 AND is_deleted = false
                  AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(rera_number.trim())
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Filter, search, sort and paginate projects.
    pub async fn search(
        pool: &PgPool,
        filter: &ProjectFilter,
        sort: SortKey,
        page: PageRequest,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let mut builder = FilterBuilder::new();
        if !filter.include_deleted {
            builder.push_raw("is_deleted = false");
        }
        if let Some(ref status) = filter.status {
            builder.push("status = {}", BindValue::Text(status.clone()));
        }
        if let Some(featured) = filter.is_featured {
            builder.push("is_featured = {}", BindValue::Bool(featured));
        }
        if let Some(pattern) = search_pattern(filter.search.as_deref()) {
            builder.push_search(SEARCH_COLUMNS, pattern);
        }
        let where_clause = builder.where_clause();

        let count_query = format!("SELECT COUNT(*)::BIGINT FROM projects {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), builder.values())
            .fetch_one(pool)
            .await?;

        let limit_idx = builder.next_idx();
        let query = format!(
            "SELECT {COLUMNS} FROM projects {where_clause} \
             ORDER BY {}, id DESC LIMIT ${limit_idx} OFFSET ${}",
            sort.to_sql(),
            limit_idx + 1
        );
        let rows = bind_values(sqlx::query_as::<_, Project>(&query), builder.values())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// The slug follows the title. Returns `None` if no active row with the
    /// given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        updated_by: Option<DbId>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                location = COALESCE($4, location),
                rera_number = COALESCE($5, rera_number),
                description = COALESCE($6, description),
                status = COALESCE($7, status),
                hero_image_url = COALESCE($8, hero_image_url),
                brochure_url = COALESCE($9, brochure_url),
                configurations = COALESCE($10, configurations),
                amenities = COALESCE($11, amenities),
                is_featured = COALESCE($12, is_featured),
                updated_by = COALESCE($13, updated_by)
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.title.as_deref().map(slugify))
            .bind(&input.location)
            .bind(input.rera_number.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.hero_image_url)
            .bind(&input.brochure_url)
            .bind(&input.configurations)
            .bind(&input.amenities)
            .bind(input.is_featured)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Count one public view.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE projects SET view_count = view_count + 1 WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Soft-delete a project by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET is_deleted = true, deleted_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted project. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET is_deleted = false, deleted_at = NULL
             WHERE id = $1 AND is_deleted = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Duplicate a project with its live gallery and floor plans.
    ///
    /// The copy is never featured and starts with zero views.
    pub async fn clone_project(
        pool: &PgPool,
        source: &Project,
        created_by: Option<DbId>,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let title = clone_title(&source.title);
        let query = format!(
            "INSERT INTO projects (title, slug, location, rera_number, description, status,
                                   hero_image_url, brochure_url, configurations, amenities,
                                   created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
             RETURNING {COLUMNS}"
        );
        let copy = sqlx::query_as::<_, Project>(&query)
            .bind(&title)
            .bind(slugify(&title))
            .bind(&source.location)
            .bind(clone_rera_number(&source.rera_number))
            .bind(&source.description)
            .bind(&source.status)
            .bind(&source.hero_image_url)
            .bind(&source.brochure_url)
            .bind(&source.configurations)
            .bind(&source.amenities)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO project_gallery_images (project_id, image_url, caption, display_order)
             SELECT $1, image_url, caption, display_order
             FROM project_gallery_images WHERE project_id = $2 AND is_deleted = false",
        )
        .bind(copy.id)
        .bind(source.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO project_floor_plans (project_id, title, file_url, display_order)
             SELECT $1, title, file_url, display_order
             FROM project_floor_plans WHERE project_id = $2 AND is_deleted = false",
        )
        .bind(copy.id)
        .bind(source.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(copy)
    }

    // -- Bulk operations ----------------------------------------------------

    /// How many of `ids` exist in the active or deleted scope.
    pub async fn count_in_scope(
        pool: &PgPool,
        ids: &[DbId],
        deleted: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM projects WHERE id = ANY($1) AND is_deleted = $2",
        )
        .bind(ids)
        .bind(deleted)
        .fetch_one(pool)
        .await
    }

    /// Active ids among `ids`, in ascending order.
    pub async fn active_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM projects WHERE id = ANY($1) AND is_deleted = false ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    pub async fn bulk_soft_delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET is_deleted = true, deleted_at = NOW()
             WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_restore(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET is_deleted = false, deleted_at = NULL
             WHERE id = ANY($1) AND is_deleted = true",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_set_status(
        pool: &PgPool,
        ids: &[DbId],
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET status = $2 WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
