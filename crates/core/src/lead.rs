//! Lead workflow rules (status, priority, follow-ups, notes).
//!
//! Statuses form a flat set with no enforced transition graph. The only
//! transition with side effects is entering `contacted` from a different
//! status; see [`enters_contacted`].

use chrono::Datelike;

use crate::listing::{SortField, SortKey};
use crate::types::Timestamp;
use crate::validation::{validate_choice, validate_min_chars};

// ---------------------------------------------------------------------------
// Status / priority / source
// ---------------------------------------------------------------------------

pub const STATUS_NEW: &str = "new";
pub const STATUS_CONTACTED: &str = "contacted";
pub const STATUS_QUALIFIED: &str = "qualified";
pub const STATUS_CLOSED: &str = "closed";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_NEW,
    STATUS_CONTACTED,
    STATUS_QUALIFIED,
    STATUS_CLOSED,
];

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

pub const VALID_PRIORITIES: &[&str] = &[
    PRIORITY_LOW,
    PRIORITY_MEDIUM,
    PRIORITY_HIGH,
    PRIORITY_URGENT,
];

pub const SOURCE_CONTACT_FORM: &str = "contact_form";
pub const SOURCE_WHATSAPP: &str = "whatsapp";
pub const SOURCE_PHONE_CALL: &str = "phone_call";
pub const SOURCE_WALK_IN: &str = "walk_in";

pub const VALID_SOURCES: &[&str] = &[
    SOURCE_CONTACT_FORM,
    SOURCE_WHATSAPP,
    SOURCE_PHONE_CALL,
    SOURCE_WALK_IN,
];

/// How the customer prefers to be reached.
pub const VALID_CONTACT_METHODS: &[&str] = &["phone", "email", "whatsapp", "any"];

pub const DEFAULT_CONTACT_METHOD: &str = "any";

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

pub const LEAD_PAGE_SIZES: &[i64] = &[10, 25, 50, 100];
pub const DEFAULT_LEAD_PAGE_SIZE: i64 = 25;

/// Sortable lead fields. Priority sorts by urgency rank, not alphabetically.
pub const LEAD_SORT_FIELDS: &[SortField] = &[
    SortField {
        name: "created_at",
        column: "l.created_at",
    },
    SortField {
        name: "priority",
        column: "CASE l.priority WHEN 'low' THEN 1 WHEN 'medium' THEN 2 WHEN 'high' THEN 3 ELSE 4 END",
    },
    SortField {
        name: "status",
        column: "l.status",
    },
    SortField {
        name: "next_follow_up",
        column: "l.next_follow_up",
    },
    SortField {
        name: "name",
        column: "l.name",
    },
];

/// Newest-created first.
pub const DEFAULT_LEAD_SORT: SortKey = SortKey::desc("l.created_at");

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MIN_NOTE_CHARS: usize = 5;

pub fn validate_status(status: &str) -> Result<(), String> {
    validate_choice(status, VALID_STATUSES, "status")
}

pub fn validate_priority(priority: &str) -> Result<(), String> {
    validate_choice(priority, VALID_PRIORITIES, "priority")
}

pub fn validate_source(source: &str) -> Result<(), String> {
    validate_choice(source, VALID_SOURCES, "source")
}

pub fn validate_contact_method(method: &str) -> Result<(), String> {
    validate_choice(method, VALID_CONTACT_METHODS, "contact method")
}

pub fn validate_name(name: &str) -> Result<(), String> {
    validate_min_chars(name, MIN_NAME_CHARS, "Name")
}

pub fn validate_message(message: &str) -> Result<(), String> {
    validate_min_chars(message, MIN_MESSAGE_CHARS, "Message")
}

pub fn validate_note(note: &str) -> Result<(), String> {
    validate_min_chars(note, MIN_NOTE_CHARS, "Note")
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Whether moving from `old` to `new` is a "became contacted" transition.
///
/// Such a transition stamps `contacted_at`, records `contacted_by` and bumps
/// `follow_up_count` by one. Re-entering `contacted` is a no-op for those
/// fields.
pub fn enters_contacted(old: &str, new: &str) -> bool {
    new == STATUS_CONTACTED && old != STATUS_CONTACTED
}

/// Timestamp format used inside note entries.
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A note line authored by `actor`, prefixed with a newline so entries can be
/// concatenated onto the existing notes.
pub fn format_note_entry(at: Timestamp, actor: &str, text: &str) -> String {
    format!("\n[{}] {actor}: {text}", at.format(NOTE_TIMESTAMP_FORMAT))
}

/// A note line recording a status change.
pub fn format_status_change_note(at: Timestamp, old: &str, new: &str, text: &str) -> String {
    format!(
        "\n[{}] Status changed from '{old}' to '{new}': {text}",
        at.format(NOTE_TIMESTAMP_FORMAT)
    )
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

pub fn status_color(status: &str) -> &'static str {
    match status {
        STATUS_NEW => "blue",
        STATUS_CONTACTED => "yellow",
        STATUS_QUALIFIED => "purple",
        STATUS_CLOSED => "green",
        _ => "gray",
    }
}

pub fn priority_color(priority: &str) -> &'static str {
    match priority {
        PRIORITY_LOW => "gray",
        PRIORITY_MEDIUM => "blue",
        PRIORITY_HIGH => "orange",
        PRIORITY_URGENT => "red",
        _ => "gray",
    }
}

/// A follow-up is overdue once its time has passed.
pub fn is_overdue(next_follow_up: Option<Timestamp>, now: Timestamp) -> bool {
    next_follow_up.is_some_and(|at| now > at)
}

/// Human-readable age such as `"3 days ago"` or `"Just now"`.
pub fn time_ago(created_at: Timestamp, now: Timestamp) -> String {
    let diff = now - created_at;
    let plural = |n: i64| if n == 1 { "" } else { "s" };

    let days = diff.num_days();
    if days > 0 {
        return format!("{days} day{} ago", plural(days));
    }
    let hours = diff.num_hours();
    if hours > 0 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let minutes = diff.num_minutes();
    if minutes > 0 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    "Just now".to_string()
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// `part / total` as a percentage rounded to two decimals; 0 when empty.
pub fn rate(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 10_000.0).round() / 100.0
}

/// Start of the current day, ISO week (Monday) and month for `now`.
pub fn period_starts(now: Timestamp) -> (Timestamp, Timestamp, Timestamp) {
    let day = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_else(|| now.naive_utc())
        .and_utc();
    let week = day - chrono::Duration::days(i64::from(now.weekday().num_days_from_monday()));
    let month = day - chrono::Duration::days(i64::from(now.day0()));
    (day, week, month)
}
