//! Read-only aggregate rows for the dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// Headline counts across content tables.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ContentCounts {
    pub total_projects: i64,
    pub upcoming_projects: i64,
    pub ongoing_projects: i64,
    pub completed_projects: i64,
    pub featured_projects: i64,
    pub total_testimonials: i64,
    pub active_testimonials: i64,
    pub total_uploads: i64,
}

/// Leads created on one calendar day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyLeadCount {
    pub day: chrono::NaiveDate,
    pub count: i64,
}
