//! Shared query parameter types for API handlers.
//!
//! Resource-specific list filters live next to their handlers; the structs
//! here appear across several modules.

use serde::Deserialize;

/// `?limit=` for short, unpaginated lists.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `?include_deleted=` for single-entity reads. Honoured for admins only.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeDeletedParams {
    #[serde(default)]
    pub include_deleted: bool,
}

/// `?all=` on the featured-projects list. Honoured for admins only.
#[derive(Debug, Default, Deserialize)]
pub struct AllParams {
    #[serde(default)]
    pub all: bool,
}
