//! Project constants, catalogs and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::listing::{SortField, SortKey};
use crate::validation::validate_choice;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const PROJECT_STATUS_UPCOMING: &str = "upcoming";
pub const PROJECT_STATUS_ONGOING: &str = "ongoing";
pub const PROJECT_STATUS_COMPLETED: &str = "completed";

pub const VALID_PROJECT_STATUSES: &[&str] = &[
    PROJECT_STATUS_UPCOMING,
    PROJECT_STATUS_ONGOING,
    PROJECT_STATUS_COMPLETED,
];

pub fn validate_project_status(status: &str) -> Result<(), String> {
    validate_choice(status, VALID_PROJECT_STATUSES, "status")
}

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

/// A selectable catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
}

const fn entry(key: &'static str, label: &'static str) -> CatalogEntry {
    CatalogEntry { key, label }
}

pub const PROJECT_CONFIGURATIONS: &[CatalogEntry] = &[
    entry("1bhk", "1 BHK"),
    entry("2bhk", "2 BHK"),
    entry("3bhk", "3 BHK"),
    entry("4bhk", "4 BHK"),
    entry("5bhk", "5 BHK"),
    entry("penthouse", "Penthouse"),
    entry("villa", "Villa"),
    entry("plot", "Plot"),
];

pub const PROJECT_AMENITIES: &[CatalogEntry] = &[
    entry("swimming_pool", "Swimming Pool"),
    entry("gym", "Gymnasium"),
    entry("clubhouse", "Clubhouse"),
    entry("children_play_area", "Children's Play Area"),
    entry("landscaped_garden", "Landscaped Garden"),
    entry("jogging_track", "Jogging Track"),
    entry("power_backup", "24x7 Power Backup"),
    entry("security", "24x7 Security"),
    entry("covered_parking", "Covered Parking"),
    entry("lift", "Lift"),
    entry("rainwater_harvesting", "Rainwater Harvesting"),
    entry("indoor_games", "Indoor Games"),
];

fn validate_catalog(values: &[String], catalog: &[CatalogEntry], label: &str) -> Result<(), String> {
    let invalid: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|v| !catalog.iter().any(|e| e.key == *v))
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(format!("Invalid {label}: {}", invalid.join(", ")))
    }
}

pub fn validate_configurations(values: &[String]) -> Result<(), String> {
    validate_catalog(values, PROJECT_CONFIGURATIONS, "configuration")
}

pub fn validate_amenities(values: &[String]) -> Result<(), String> {
    validate_catalog(values, PROJECT_AMENITIES, "amenity")
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

pub const PROJECT_PAGE_SIZES: &[i64] = &[10, 25, 50, 100];
pub const DEFAULT_PROJECT_PAGE_SIZE: i64 = 10;

pub const PROJECT_SORT_FIELDS: &[SortField] = &[
    SortField {
        name: "created_at",
        column: "created_at",
    },
    SortField {
        name: "updated_at",
        column: "updated_at",
    },
    SortField {
        name: "title",
        column: "title",
    },
    SortField {
        name: "status",
        column: "status",
    },
    SortField {
        name: "view_count",
        column: "view_count",
    },
];

pub const DEFAULT_PROJECT_SORT: SortKey = SortKey::desc("created_at");

// ---------------------------------------------------------------------------
// Slugs and cloning
// ---------------------------------------------------------------------------

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Lowercase, hyphen-separated slug of a title.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

pub fn clone_title(title: &str) -> String {
    format!("{title} (Copy)")
}

pub fn clone_rera_number(rera_number: &str) -> String {
    format!("{rera_number}-COPY")
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required.".to_string());
    }
    Ok(())
}
