//! Lead entity model and DTOs.

use greenhomes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_id: Option<DbId>,
    pub message: String,
    pub status: String,
    pub priority: String,
    pub source: String,
    pub preferred_contact_method: String,
    pub next_follow_up: Option<Timestamp>,
    pub follow_up_count: i32,
    pub contacted_at: Option<Timestamp>,
    pub contacted_by: Option<DbId>,
    pub notes: String,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lead joined with its project and the admin who contacted it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadWithRelations {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub lead: Lead,
    pub project_title: Option<String>,
    pub project_location: Option<String>,
    pub contacted_by_name: Option<String>,
    pub contacted_by_email: Option<String>,
}

/// DTO for a public inquiry submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_id: Option<DbId>,
    pub message: String,
    /// Defaults to `contact_form` if omitted.
    pub source: Option<String>,
    /// Defaults to `any` if omitted.
    pub preferred_contact_method: Option<String>,
}

/// DTO for an admin edit. All fields are optional; `notes` is deliberately
/// absent because notes only grow through note entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project_id: Option<DbId>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub next_follow_up: Option<Timestamp>,
}

/// A status transition with its optional note and follow-up.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: String,
    pub note: Option<String>,
    pub next_follow_up: Option<Timestamp>,
    /// Admin credited with the contact if this enters `contacted`.
    pub actor_id: Option<DbId>,
    pub at: Timestamp,
}

/// Filters accepted by the lead list.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub project_id: Option<DbId>,
    pub contacted_by: Option<DbId>,
    pub search: Option<String>,
    /// Only leads whose follow-up lies before `now`.
    pub overdue_only: bool,
    pub include_deleted: bool,
}

/// Aggregate counts over active leads.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct LeadCounts {
    pub total: i64,
    pub new: i64,
    pub contacted: i64,
    pub qualified: i64,
    pub closed: i64,
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub urgent: i64,
    pub with_follow_up: i64,
    pub overdue_follow_ups: i64,
    pub today: i64,
    pub this_week: i64,
    pub this_month: i64,
}

/// A `(key, count)` pair from a `GROUP BY`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: i64,
}
