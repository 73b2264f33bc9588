//! List pipeline helpers: page-size snapping, pagination metadata, sort
//! allow-lists and ILIKE pattern building.
//!
//! Repositories turn these into SQL; handlers turn [`PageMeta`] into the
//! `pagination` block of list responses.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A resolved page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Resolve raw query values.
    ///
    /// Pages below 1 become 1. A page size outside `allowed` silently falls
    /// back to `default_size` rather than erroring.
    pub fn resolve(
        page: Option<i64>,
        page_size: Option<i64>,
        allowed: &[i64],
        default_size: i64,
    ) -> Self {
        let page_size = match page_size {
            Some(size) if allowed.contains(&size) => size,
            _ => default_size,
        };
        Self {
            page: page.unwrap_or(1).max(1),
            page_size,
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip. Saturates for absurd page numbers, which then simply
    /// yield an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Pagination metadata returned alongside every list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMeta {
    pub fn new(total: i64, request: PageRequest) -> Self {
        let total_pages = if request.page_size > 0 {
            (total + request.page_size - 1) / request.page_size
        } else {
            0
        };
        Self {
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        }
    }
}

/// One page of rows plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T: Serialize> {
    pub results: Vec<T>,
    pub pagination: PageMeta,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(results: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            results,
            pagination: PageMeta::new(total, request),
        }
    }
}

/// Clamp a user-provided limit to `[1, max]`, defaulting to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// An allow-listed sortable field: the public name and the SQL expression
/// it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub name: &'static str,
    pub column: &'static str,
}

/// A resolved `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: &'static str,
    pub descending: bool,
}

impl SortKey {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    /// Resolve `"field"` / `"-field"` through `allowed`. Unknown or missing
    /// keys yield `default`.
    pub fn resolve(raw: Option<&str>, allowed: &[SortField], default: SortKey) -> SortKey {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return default;
        };
        let (name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        match allowed.iter().find(|f| f.name == name) {
            Some(field) => SortKey {
                column: field.column,
                descending,
            },
            None => default,
        }
    }

    /// Resolve a separate `sort_by` + `sort_order` pair. Anything other than
    /// `"asc"` sorts descending.
    pub fn resolve_with_order(
        field: Option<&str>,
        order: Option<&str>,
        allowed: &[SortField],
        default: SortKey,
    ) -> SortKey {
        let column = field
            .and_then(|name| allowed.iter().find(|f| f.name == name))
            .map(|f| f.column)
            .unwrap_or(default.column);
        SortKey {
            column,
            descending: !matches!(order, Some(o) if o.eq_ignore_ascii_case("asc")),
        }
    }

    /// Render as an `ORDER BY` fragment.
    pub fn to_sql(&self) -> String {
        let direction = if self.descending { "DESC" } else { "ASC" };
        format!("{} {direction}", self.column)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Build a `%term%` ILIKE pattern, escaping LIKE metacharacters.
///
/// Returns `None` for empty or whitespace-only input so callers can skip the
/// search clause entirely.
pub fn search_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Some(format!("%{escaped}%"))
}

/// Parse a `"true"` / `"false"` query flag, case-insensitively.
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    raw.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: &[i64] = &[10, 25, 50, 100];

    const FIELDS: &[SortField] = &[
        SortField {
            name: "created_at",
            column: "l.created_at",
        },
        SortField {
            name: "name",
            column: "l.name",
        },
    ];

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn page_size_outside_allowed_set_falls_back() {
        let req = PageRequest::resolve(Some(1), Some(37), SIZES, 25);
        assert_eq!(req.page_size, 25);
    }

    #[test]
    fn page_size_inside_allowed_set_is_kept() {
        let req = PageRequest::resolve(Some(2), Some(50), SIZES, 25);
        assert_eq!(req.page_size, 50);
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let req = PageRequest::resolve(Some(i64::MAX), Some(25), SIZES, 25);
        assert_eq!(req.offset(), i64::MAX);

        let meta = PageMeta::new(3, req);
        assert!(!meta.has_next);
        assert!(meta.has_previous);
    }

    #[test]
    fn page_below_one_becomes_one() {
        let req = PageRequest::resolve(Some(-3), None, SIZES, 25);
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);
    }

    // -- PageMeta ------------------------------------------------------------

    #[test]
    fn meta_counts_partial_last_page() {
        let meta = PageMeta::new(51, PageRequest { page: 1, page_size: 25 });
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_previous);
    }

    #[test]
    fn meta_last_page_has_no_next() {
        let meta = PageMeta::new(50, PageRequest { page: 2, page_size: 25 });
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next);
        assert!(meta.has_previous);
    }

    #[test]
    fn meta_empty_collection() {
        let meta = PageMeta::new(0, PageRequest { page: 1, page_size: 10 });
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }

    // -- SortKey -------------------------------------------------------------

    #[test]
    fn sort_descending_prefix() {
        let key = SortKey::resolve(Some("-name"), FIELDS, SortKey::desc("l.created_at"));
        assert_eq!(key, SortKey::desc("l.name"));
        assert_eq!(key.to_sql(), "l.name DESC");
    }

    #[test]
    fn sort_unknown_key_uses_default() {
        let key = SortKey::resolve(
            Some("password; DROP TABLE leads"),
            FIELDS,
            SortKey::desc("l.created_at"),
        );
        assert_eq!(key, SortKey::desc("l.created_at"));
    }

    #[test]
    fn sort_with_order_pair() {
        let key = SortKey::resolve_with_order(
            Some("name"),
            Some("asc"),
            FIELDS,
            SortKey::desc("l.created_at"),
        );
        assert_eq!(key, SortKey::asc("l.name"));

        let key = SortKey::resolve_with_order(Some("bogus"), None, FIELDS, SortKey::desc("l.created_at"));
        assert_eq!(key, SortKey::desc("l.created_at"));
    }

    // -- search_pattern ------------------------------------------------------

    #[test]
    fn search_pattern_wraps_and_escapes() {
        assert_eq!(search_pattern(Some("kumar")), Some("%kumar%".to_string()));
        assert_eq!(search_pattern(Some("50%_off")), Some("%50\\%\\_off%".to_string()));
    }

    #[test]
    fn search_pattern_blank_is_none() {
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(None), None);
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 10, 50), 10);
        assert_eq!(clamp_limit(Some(500), 10, 50), 50);
        assert_eq!(clamp_limit(Some(0), 10, 50), 1);
    }

    #[test]
    fn parse_flag_values() {
        assert_eq!(parse_flag(Some("TRUE")), Some(true));
        assert_eq!(parse_flag(Some("no")), Some(false));
        assert_eq!(parse_flag(None), None);
    }
}
