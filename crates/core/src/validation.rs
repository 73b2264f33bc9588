//! Field-level validation primitives shared by every request type.
//!
//! Validation functions follow the `fn(&T) -> Result<(), String>` shape so
//! they can be unit tested in isolation; [`FieldErrors`] collects their
//! failures under the offending field name for the response envelope.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// A `field -> [messages]` map, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a map holding exactly one message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the error of a validation function result, if any.
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                out.add(field.as_ref(), message);
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Require at least `min` characters once surrounding whitespace is trimmed.
pub fn validate_min_chars(value: &str, min: usize, label: &str) -> Result<(), String> {
    if value.trim().chars().count() < min {
        return Err(format!("{label} must be at least {min} characters long."));
    }
    Ok(())
}

/// Require `value` to be one of `allowed`, listing the allowed set otherwise.
pub fn validate_choice(value: &str, allowed: &[&str], label: &str) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {label}. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

/// A scheduled follow-up must lie strictly after `now`.
pub fn validate_future(at: Timestamp, now: Timestamp) -> Result<(), String> {
    if at <= now {
        return Err("Follow-up date must be in the future.".to_string());
    }
    Ok(())
}

/// Loose international phone check.
///
/// Spaces, dashes, parentheses and `+` are stripped; what remains must be a
/// non-empty run of ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid phone number format.".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.validate_email() {
        Ok(())
    } else {
        Err("Enter a valid email address.".to_string())
    }
}

/// Empty strings are accepted; anything else must parse as a URL.
pub fn validate_optional_url(url: &str) -> Result<(), String> {
    if url.is_empty() || url.validate_url() {
        Ok(())
    } else {
        Err("Enter a valid URL.".to_string())
    }
}
