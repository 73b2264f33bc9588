//! Dashboard arithmetic and labels.

/// `part / total` as a percentage rounded to one decimal; 0 when empty.
pub fn percentage_1dp(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Uppercase the first character: `"ongoing"` -> `"Ongoing"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Recent leads shown on the overview card.
pub const OVERVIEW_RECENT_LEADS: i64 = 3;
pub const DEFAULT_RECENT_LEADS: i64 = 10;
pub const MAX_RECENT_LEADS: i64 = 50;

/// Days covered by the lead trend chart.
pub const ANALYTICS_DAYS: i64 = 7;
