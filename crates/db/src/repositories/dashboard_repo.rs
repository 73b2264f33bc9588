//! Read-only aggregates backing the dashboard.

use greenhomes_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::dashboard::{ContentCounts, DailyLeadCount};
use crate::models::lead::KeyCount;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts over live projects, testimonials and uploads.
    pub async fn content_counts(pool: &PgPool) -> Result<ContentCounts, sqlx::Error> {
        sqlx::query_as::<_, ContentCounts>(
            "SELECT
                (SELECT COUNT(*) FROM projects WHERE is_deleted = false)::BIGINT AS total_projects,
                (SELECT COUNT(*) FROM projects WHERE is_deleted = false AND status = 'upcoming')::BIGINT AS upcoming_projects,
                (SELECT COUNT(*) FROM projects WHERE is_deleted = false AND status = 'ongoing')::BIGINT AS ongoing_projects,
                (SELECT COUNT(*) FROM projects WHERE is_deleted = false AND status = 'completed')::BIGINT AS completed_projects,
                (SELECT COUNT(*) FROM featured_projects f JOIN projects p ON p.id = f.project_id
                   WHERE f.is_active = true AND p.is_deleted = false)::BIGINT AS featured_projects,
                (SELECT COUNT(*) FROM testimonials WHERE is_deleted = false)::BIGINT AS total_testimonials,
                (SELECT COUNT(*) FROM testimonials WHERE is_deleted = false AND is_active = true)::BIGINT AS active_testimonials,
                (SELECT COUNT(*) FROM uploaded_images)::BIGINT AS total_uploads",
        )
        .fetch_one(pool)
        .await
    }

    /// Live project counts per status.
    pub async fn project_status_counts(pool: &PgPool) -> Result<Vec<KeyCount>, sqlx::Error> {
        sqlx::query_as::<_, KeyCount>(
            "SELECT status AS key, COUNT(*)::BIGINT AS count
             FROM projects WHERE is_deleted = false
             GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Active lead counts per status.
    pub async fn lead_status_counts(pool: &PgPool) -> Result<Vec<KeyCount>, sqlx::Error> {
        sqlx::query_as::<_, KeyCount>(
            "SELECT status AS key, COUNT(*)::BIGINT AS count
             FROM leads WHERE is_deleted = false
             GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Leads created per UTC day since `since`. Days without leads are absent.
    pub async fn leads_per_day(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<DailyLeadCount>, sqlx::Error> {
        sqlx::query_as::<_, DailyLeadCount>(
            "SELECT (created_at AT TIME ZONE 'UTC')::DATE AS day, COUNT(*)::BIGINT AS count
             FROM leads WHERE is_deleted = false AND created_at >= $1
             GROUP BY day ORDER BY day",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
