//! Repositories for `project_gallery_images` and `project_floor_plans`.
//!
//! Both are child collections of a project, ordered by `display_order` and
//! soft-deleted like their parent. Lookups are always scoped to the parent
//! project id.

use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_media::{
    CreateFloorPlan, CreateGalleryImage, FloorPlan, GalleryImage, UpdateFloorPlan,
    UpdateGalleryImage,
};

const GALLERY_COLUMNS: &str = "id, project_id, image_url, caption, display_order, \
                               is_deleted, deleted_at, created_at, updated_at";

const FLOOR_PLAN_COLUMNS: &str = "id, project_id, title, file_url, display_order, \
                                  is_deleted, deleted_at, created_at, updated_at";

// ---------------------------------------------------------------------------
// GalleryImageRepo
// ---------------------------------------------------------------------------

pub struct GalleryImageRepo;

impl GalleryImageRepo {
    /// Live gallery images of a project in display order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {GALLERY_COLUMNS} FROM project_gallery_images
             WHERE project_id = $1 AND is_deleted = false
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Insert an image. Without an explicit order it goes after the last one.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateGalleryImage,
    ) -> Result<GalleryImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_gallery_images (project_id, image_url, caption, display_order)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, (
                 SELECT COALESCE(MAX(display_order), 0) + 1
                 FROM project_gallery_images WHERE project_id = $1 AND is_deleted = false
             )))
             RETURNING {GALLERY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(project_id)
            .bind(&input.image_url)
            .bind(&input.caption)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {GALLERY_COLUMNS} FROM project_gallery_images
             WHERE id = $1 AND project_id = $2 AND is_deleted = false"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateGalleryImage,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!(
            "UPDATE project_gallery_images SET
                image_url = COALESCE($3, image_url),
                caption = COALESCE($4, caption),
                display_order = COALESCE($5, display_order)
             WHERE id = $1 AND project_id = $2 AND is_deleted = false
             RETURNING {GALLERY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.image_url)
            .bind(&input.caption)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an image. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_gallery_images SET is_deleted = true, deleted_at = NOW()
             WHERE id = $1 AND project_id = $2 AND is_deleted = false",
        )
        .bind(id)
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Like [`Self::find_by_id`] but also returns soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {GALLERY_COLUMNS} FROM project_gallery_images WHERE id = $1 AND project_id = $2"
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Restore a soft-deleted image. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_gallery_images SET is_deleted = false, deleted_at = NULL
             WHERE id = $1 AND project_id = $2 AND is_deleted = true",
        )
        .bind(id)
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// FloorPlanRepo
// ---------------------------------------------------------------------------

pub struct FloorPlanRepo;

impl FloorPlanRepo {
    /// Live floor plans of a project in display order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<FloorPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {FLOOR_PLAN_COLUMNS} FROM project_floor_plans
             WHERE project_id = $1 AND is_deleted = false
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateFloorPlan,
    ) -> Result<FloorPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_floor_plans (project_id, title, file_url, display_order)
             VALUES ($1, $2, $3, COALESCE($4, (
                 SELECT COALESCE(MAX(display_order), 0) + 1
                 FROM project_floor_plans WHERE project_id = $1 AND is_deleted = false
             )))
             RETURNING {FLOOR_PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(project_id)
            .bind(input.title.trim())
            .bind(&input.file_url)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<FloorPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {FLOOR_PLAN_COLUMNS} FROM project_floor_plans
             WHERE id = $1 AND project_id = $2 AND is_deleted = false"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateFloorPlan,
    ) -> Result<Option<FloorPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE project_floor_plans SET
                title = COALESCE($3, title),
                file_url = COALESCE($4, file_url),
                display_order = COALESCE($5, display_order)
             WHERE id = $1 AND project_id = $2 AND is_deleted = false
             RETURNING {FLOOR_PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.file_url)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a floor plan. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_floor_plans SET is_deleted = true, deleted_at = NOW()
             WHERE id = $1 AND project_id = $2 AND is_deleted = false",
        )
        .bind(id)
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Like [`Self::find_by_id`] but also returns soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<FloorPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {FLOOR_PLAN_COLUMNS} FROM project_floor_plans WHERE id = $1 AND project_id = $2"
        );
        sqlx::query_as::<_, FloorPlan>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Restore a soft-deleted floor plan. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_floor_plans SET is_deleted = false, deleted_at = NULL
             WHERE id = $1 AND project_id = $2 AND is_deleted = true",
        )
        .bind(id)
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
