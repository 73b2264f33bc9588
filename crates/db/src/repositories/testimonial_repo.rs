//! Repository for the `testimonials` table.

use greenhomes_core::listing::{search_pattern, PageRequest, SortKey};
use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::testimonial::{
    CreateTestimonial, Testimonial, TestimonialFilter, UpdateTestimonial,
};
use crate::query::{bind_values, bind_values_scalar, BindValue, FilterBuilder};

const JOINED_COLUMNS: &str = "t.id, t.customer_name, t.project_id, p.title AS project_title, \
    t.quote, t.customer_photo, t.rating, t.verified, t.is_active, t.display_order, \
    t.is_deleted, t.deleted_at, t.created_at, t.updated_at";

const JOINS: &str = "FROM testimonials t LEFT JOIN projects p ON p.id = t.project_id";

const SEARCH_COLUMNS: &[&str] = &["t.customer_name", "t.quote", "p.title"];

pub struct TestimonialRepo;

impl TestimonialRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO testimonials (customer_name, project_id, quote, customer_photo, rating,
                                       verified, is_active, display_order)
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, 5), COALESCE($6, false),
                     COALESCE($7, true), COALESCE($8, 0))
             RETURNING id",
        )
        .bind(input.customer_name.trim())
        .bind(input.project_id)
        .bind(input.quote.trim())
        .bind(&input.customer_photo)
        .bind(input.rating)
        .bind(input.verified)
        .bind(input.is_active)
        .bind(input.display_order)
        .fetch_one(pool)
        .await?;
        Self::find_by_id_include_deleted(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a testimonial by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query =
            format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE t.id = $1 AND t.is_deleted = false");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {JOINED_COLUMNS} {JOINS} WHERE t.id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filter, search, sort and paginate testimonials.
    pub async fn search(
        pool: &PgPool,
        filter: &TestimonialFilter,
        sort: SortKey,
        page: PageRequest,
    ) -> Result<(Vec<Testimonial>, i64), sqlx::Error> {
        let mut builder = FilterBuilder::new();
        if !filter.include_deleted {
            builder.push_raw("t.is_deleted = false");
        }
        if let Some(project_id) = filter.project_id {
            builder.push("t.project_id = {}", BindValue::BigInt(project_id));
        }
        if let Some(active) = filter.is_active {
            builder.push("t.is_active = {}", BindValue::Bool(active));
        }
        if let Some(verified) = filter.verified {
            builder.push("t.verified = {}", BindValue::Bool(verified));
        }
        if let Some(min_rating) = filter.min_rating {
            builder.push("t.rating >= {}", BindValue::Int(min_rating));
        }
        if let Some(pattern) = search_pattern(filter.search.as_deref()) {
            builder.push_search(SEARCH_COLUMNS, pattern);
        }
        let where_clause = builder.where_clause();

        let count_query = format!("SELECT COUNT(*)::BIGINT {JOINS} {where_clause}");
        let total = bind_values_scalar(sqlx::query_scalar::<_, i64>(&count_query), builder.values())
            .fetch_one(pool)
            .await?;

        let limit_idx = builder.next_idx();
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS} {where_clause} \
             ORDER BY {}, t.id DESC LIMIT ${limit_idx} OFFSET ${}",
            sort.to_sql(),
            limit_idx + 1
        );
        let rows = bind_values(sqlx::query_as::<_, Testimonial>(&query), builder.values())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Active, live testimonials for public display: by display order, then newest.
    pub async fn list_for_display(pool: &PgPool, limit: i64) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINS}
             WHERE t.is_deleted = false AND t.is_active = true
             ORDER BY t.display_order, t.created_at DESC, t.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a testimonial. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET
                customer_name = COALESCE($2, customer_name),
                project_id = COALESCE($3, project_id),
                quote = COALESCE($4, quote),
                customer_photo = COALESCE($5, customer_photo),
                rating = COALESCE($6, rating),
                verified = COALESCE($7, verified),
                is_active = COALESCE($8, is_active),
                display_order = COALESCE($9, display_order)
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .bind(input.customer_name.as_deref().map(str::trim))
        .bind(input.project_id)
        .bind(input.quote.as_deref().map(str::trim))
        .bind(&input.customer_photo)
        .bind(input.rating)
        .bind(input.verified)
        .bind(input.is_active)
        .bind(input.display_order)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Soft-delete a testimonial. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET is_deleted = true, deleted_at = NOW()
             WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted testimonial. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET is_deleted = false, deleted_at = NULL
             WHERE id = $1 AND is_deleted = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Bulk operations ----------------------------------------------------

    pub async fn count_in_scope(
        pool: &PgPool,
        ids: &[DbId],
        deleted: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM testimonials WHERE id = ANY($1) AND is_deleted = $2",
        )
        .bind(ids)
        .bind(deleted)
        .fetch_one(pool)
        .await
    }

    pub async fn bulk_soft_delete(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET is_deleted = true, deleted_at = NOW()
             WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_restore(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET is_deleted = false, deleted_at = NULL
             WHERE id = ANY($1) AND is_deleted = true",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_set_active(
        pool: &PgPool,
        ids: &[DbId],
        is_active: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET is_active = $2 WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .bind(is_active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn bulk_set_verified(
        pool: &PgPool,
        ids: &[DbId],
        verified: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE testimonials SET verified = $2 WHERE id = ANY($1) AND is_deleted = false",
        )
        .bind(ids)
        .bind(verified)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
