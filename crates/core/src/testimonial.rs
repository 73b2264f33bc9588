//! Testimonial validation and listing rules.

use crate::listing::{SortField, SortKey};
use crate::validation::validate_min_chars;

pub const MIN_CUSTOMER_NAME_CHARS: usize = 2;
pub const MIN_QUOTE_CHARS: usize = 10;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_customer_name(name: &str) -> Result<(), String> {
    validate_min_chars(name, MIN_CUSTOMER_NAME_CHARS, "Customer name")
}

pub fn validate_quote(quote: &str) -> Result<(), String> {
    validate_min_chars(quote, MIN_QUOTE_CHARS, "Quote")
}

pub fn validate_rating(rating: i32) -> Result<(), String> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}."
        ));
    }
    Ok(())
}

pub const TESTIMONIAL_PAGE_SIZES: &[i64] = &[10, 25, 50, 100];
pub const DEFAULT_TESTIMONIAL_PAGE_SIZE: i64 = 25;

pub const TESTIMONIAL_SORT_FIELDS: &[SortField] = &[
    SortField {
        name: "created_at",
        column: "t.created_at",
    },
    SortField {
        name: "rating",
        column: "t.rating",
    },
    SortField {
        name: "display_order",
        column: "t.display_order",
    },
    SortField {
        name: "customer_name",
        column: "t.customer_name",
    },
];

pub const DEFAULT_TESTIMONIAL_SORT: SortKey = SortKey::desc("t.created_at");

/// Testimonials shown on the public homepage block.
pub const DEFAULT_DISPLAY_LIMIT: i64 = 10;
pub const MAX_DISPLAY_LIMIT: i64 = 20;
