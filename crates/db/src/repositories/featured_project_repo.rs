//! Repository for the `featured_projects` table.
//!
//! A project has at most one featured entry (`uq_featured_projects_project_id`).
//! The `projects.is_featured` flag mirrors whether an entry exists and is kept
//! in sync inside the same transaction.

use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::featured_project::{
    CreateFeaturedProject, FeaturedProject, UpdateFeaturedProject,
};

const JOINED_COLUMNS: &str = "f.id, f.project_id, f.display_order, f.is_active, \
    p.title AS project_title, p.slug AS project_slug, p.location AS project_location, \
    p.status AS project_status, p.hero_image_url AS project_hero_image_url, \
    f.created_at, f.updated_at";

const JOINS: &str = "FROM featured_projects f JOIN projects p ON p.id = f.project_id";

/// Next free display order at the end of the list.
const NEXT_ORDER: &str = "(SELECT COALESCE(MAX(display_order), 0) + 1 FROM featured_projects)";

pub struct FeaturedProjectRepo;

impl FeaturedProjectRepo {
    /// Active entries whose project is live, in display order.
    pub async fn list_active(pool: &PgPool, limit: i64) -> Result<Vec<FeaturedProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS}
             WHERE f.is_active = true AND p.is_deleted = false
             ORDER BY f.display_order, f.id
             LIMIT $1"
        );
        sqlx::query_as::<_, FeaturedProject>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every entry, active or not, in display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<FeaturedProject>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} ORDER BY f.display_order, f.id");
        sqlx::query_as::<_, FeaturedProject>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FeaturedProject>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE f.id = $1");
        sqlx::query_as::<_, FeaturedProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<FeaturedProject>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE f.project_id = $1");
        sqlx::query_as::<_, FeaturedProject>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new entry. A second entry for the same project violates
    /// `uq_featured_projects_project_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFeaturedProject,
    ) -> Result<FeaturedProject, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, DbId>(&format!(
            "INSERT INTO featured_projects (project_id, display_order, is_active)
             VALUES ($1, COALESCE($2, {NEXT_ORDER}), COALESCE($3, true))
             RETURNING id"
        ))
        .bind(input.project_id)
        .bind(input.display_order)
        .bind(input.is_active)
        .fetch_one(&mut *tx)
        .await?;
        set_project_flag(&mut tx, input.project_id, true).await?;

        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE f.id = $1");
        let row = sqlx::query_as::<_, FeaturedProject>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Feature a project.
    ///
    /// An active entry keeps its place. A missing or inactive entry is
    /// (re)activated at the end of the list; the old order is not reused.
    pub async fn feature(pool: &PgPool, project_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query(&format!(
            "INSERT INTO featured_projects (project_id, display_order)
             VALUES ($1, {NEXT_ORDER})
             ON CONFLICT (project_id) DO UPDATE SET
                display_order = CASE WHEN featured_projects.is_active
                                     THEN featured_projects.display_order
                                     ELSE EXCLUDED.display_order END,
                is_active = true"
        ))
        .bind(project_id)
        .execute(&mut *tx)
        .await?;
        set_project_flag(&mut tx, project_id, true).await?;
        tx.commit().await
    }

    /// Remove a project's entry. Returns `true` if an entry existed.
    pub async fn unfeature(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query("DELETE FROM featured_projects WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        set_project_flag(&mut tx, project_id, false).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFeaturedProject,
    ) -> Result<Option<FeaturedProject>, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE featured_projects SET
                display_order = COALESCE($2, display_order),
                is_active = COALESCE($3, is_active)
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.display_order)
        .bind(input.is_active)
        .execute(pool)
        .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Delete an entry by its own ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let project_id = sqlx::query_scalar::<_, DbId>(
            "DELETE FROM featured_projects WHERE id = $1 RETURNING project_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(project_id) = project_id else {
            return Ok(false);
        };
        set_project_flag(&mut tx, project_id, false).await?;
        tx.commit().await?;
        Ok(true)
    }
}

async fn set_project_flag(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: DbId,
    featured: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE projects SET is_featured = $2 WHERE id = $1")
        .bind(project_id)
        .bind(featured)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
