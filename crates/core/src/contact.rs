//! Contact settings helpers.

/// Join the non-empty address parts with `", "`.
pub fn full_address(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
