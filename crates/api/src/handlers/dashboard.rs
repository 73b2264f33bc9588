//! Handlers for `/dashboard`: read-only aggregates for the admin home screen.

use std::collections::HashMap;

use axum::extract::State;
use chrono::{Duration, NaiveDate, Utc};
use greenhomes_core::dashboard::{
    capitalize, percentage_1dp, ANALYTICS_DAYS, DEFAULT_RECENT_LEADS, MAX_RECENT_LEADS,
    OVERVIEW_RECENT_LEADS,
};
use greenhomes_core::lead::period_starts;
use greenhomes_core::listing::clamp_limit;
use greenhomes_db::models::lead::KeyCount;
use greenhomes_db::repositories::{DashboardRepo, LeadRepo, SystemStatusRepo};
use serde::Serialize;

use super::leads::LeadView;
use super::settings::SystemStatusView;
use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::rbac::RequireAdmin;
use crate::query::LimitParams;
use crate::response::{ok, Envelope};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub upcoming_projects: i64,
    pub ongoing_projects: i64,
    pub completed_projects: i64,
    pub featured_projects: i64,
    pub total_testimonials: i64,
    pub active_testimonials: i64,
    pub total_uploads: i64,
    pub total_leads: i64,
    pub new_leads: i64,
    pub leads_today: i64,
    pub leads_this_week: i64,
    pub leads_this_month: i64,
    pub overdue_follow_ups: i64,
}

/// One slice of a status breakdown chart.
#[derive(Debug, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub status: String,
    pub label: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub statistics: DashboardStats,
    pub recent_leads: Vec<LeadView>,
    pub system_status: SystemStatusView,
    pub project_breakdown: Vec<BreakdownEntry>,
    pub lead_breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SourceCount {
    pub source: String,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardAnalytics {
    pub leads_last_7_days: Vec<DailyCount>,
    pub lead_sources: Vec<SourceCount>,
}

/// GET /api/v1/dashboard
pub async fn overview(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Envelope<DashboardOverview>> {
    let statistics = load_stats(&state).await?;
    let recent_leads = recent(&state, OVERVIEW_RECENT_LEADS).await?;
    let system_status = SystemStatusRepo::get_current(&state.pool).await?.into();
    let project_breakdown = breakdown(DashboardRepo::project_status_counts(&state.pool).await?);
    let lead_breakdown = breakdown(DashboardRepo::lead_status_counts(&state.pool).await?);

    Ok(ok(
        "Dashboard data retrieved successfully",
        DashboardOverview {
            statistics,
            recent_leads,
            system_status,
            project_breakdown,
            lead_breakdown,
        },
    ))
}

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Envelope<DashboardStats>> {
    let statistics = load_stats(&state).await?;
    Ok(ok("Dashboard statistics retrieved successfully", statistics))
}

/// GET /api/v1/dashboard/recent-leads
pub async fn recent_leads(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<Envelope<Vec<LeadView>>> {
    let limit = clamp_limit(params.limit, DEFAULT_RECENT_LEADS, MAX_RECENT_LEADS);
    let leads = recent(&state, limit).await?;
    Ok(ok("Recent leads retrieved successfully", leads))
}

/// GET /api/v1/dashboard/system-status
pub async fn system_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Envelope<SystemStatusView>> {
    let status = SystemStatusRepo::get_current(&state.pool).await?;
    Ok(ok("System status retrieved successfully", status.into()))
}

/// GET /api/v1/dashboard/analytics
pub async fn analytics(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Envelope<DashboardAnalytics>> {
    let now = Utc::now();
    let (today_start, _, _) = period_starts(now);
    let since = today_start - Duration::days(ANALYTICS_DAYS - 1);

    let per_day = DashboardRepo::leads_per_day(&state.pool, since).await?;
    let counts: HashMap<NaiveDate, i64> = per_day.into_iter().map(|d| (d.day, d.count)).collect();

    let sources = LeadRepo::count_by_source(&state.pool).await?;

    Ok(ok(
        "Analytics data retrieved successfully",
        DashboardAnalytics {
            leads_last_7_days: fill_days(since.date_naive(), ANALYTICS_DAYS, &counts),
            lead_sources: sources
                .into_iter()
                .map(|s| SourceCount {
                    label: capitalize(&s.key.replace('_', " ")),
                    source: s.key,
                    count: s.count,
                })
                .collect(),
        },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_stats(state: &AppState) -> AppResult<DashboardStats> {
    let content = DashboardRepo::content_counts(&state.pool).await?;
    let (today, week, month) = period_starts(Utc::now());
    let leads = LeadRepo::counts(&state.pool, today, week, month).await?;

    Ok(DashboardStats {
        total_projects: content.total_projects,
        upcoming_projects: content.upcoming_projects,
        ongoing_projects: content.ongoing_projects,
        completed_projects: content.completed_projects,
        featured_projects: content.featured_projects,
        total_testimonials: content.total_testimonials,
        active_testimonials: content.active_testimonials,
        total_uploads: content.total_uploads,
        total_leads: leads.total,
        new_leads: leads.new,
        leads_today: leads.today,
        leads_this_week: leads.this_week,
        leads_this_month: leads.this_month,
        overdue_follow_ups: leads.overdue_follow_ups,
    })
}

async fn recent(state: &AppState, limit: i64) -> AppResult<Vec<LeadView>> {
    let now = Utc::now();
    let leads = LeadRepo::recent(&state.pool, limit).await?;
    Ok(leads.into_iter().map(|l| LeadView::new(l, now)).collect())
}

fn breakdown(counts: Vec<KeyCount>) -> Vec<BreakdownEntry> {
    let total: i64 = counts.iter().map(|c| c.count).sum();
    counts
        .into_iter()
        .map(|c| BreakdownEntry {
            label: capitalize(&c.key),
            percentage: percentage_1dp(c.count, total),
            count: c.count,
            status: c.key,
        })
        .collect()
}

/// One entry per day starting at `start`, zero where nothing was recorded.
fn fill_days(start: NaiveDate, days: i64, counts: &HashMap<NaiveDate, i64>) -> Vec<DailyCount> {
    (0..days)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DailyCount {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
