//! Repository for the `uploaded_images` table.

use greenhomes_core::listing::{search_pattern, PageRequest};
use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::uploaded_image::{CreateUploadedImage, UploadedImage};
use crate::query::{bind_values, bind_values_scalar, FilterBuilder};

const JOINED_COLUMNS: &str = "u.id, u.title, u.description, u.image_url, u.storage_path, \
    u.uploaded_by, a.full_name AS uploaded_by_name, u.created_at, u.updated_at";

const JOINS: &str = "FROM uploaded_images u LEFT JOIN admin_users a ON a.id = u.uploaded_by";

pub struct UploadedImageRepo;

impl UploadedImageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateUploadedImage,
    ) -> Result<UploadedImage, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO uploaded_images (title, description, image_url, storage_path, uploaded_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(&input.storage_path)
        .bind(input.uploaded_by)
        .fetch_one(pool)
        .await?;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UploadedImage>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE u.id = $1");
        sqlx::query_as::<_, UploadedImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest-first page of uploads, optionally searched by title/description.
    pub async fn search(
        pool: &PgPool,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<UploadedImage>, i64), sqlx::Error> {
        let mut builder = FilterBuilder::new();
        if let Some(pattern) = search_pattern(search) {
            builder.push_search(&["u.title", "u.description"], pattern);
        }
        let where_clause = builder.where_clause();

        let count_query = format!("SELECT COUNT(*)::BIGINT {JOINS} {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), builder.values())
            .fetch_one(pool)
            .await?;

        let limit_idx = builder.next_idx();
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS} {where_clause} \
             ORDER BY u.created_at DESC, u.id DESC LIMIT ${limit_idx} OFFSET ${}",
            limit_idx + 1
        );
        let rows = bind_values(sqlx::query_as::<_, UploadedImage>(&query), builder.values())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Permanently delete the row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM uploaded_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
