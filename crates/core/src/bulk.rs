//! Bulk-action requests.
//!
//! Each resource accepts a flat request body (`action` plus optional
//! parameters). Parsing turns it into a closed enum whose variants carry their
//! own required parameters, so the executor is a single exhaustive `match`.

use crate::lead::{validate_priority, validate_status};
use crate::project::validate_project_status;
use crate::types::DbId;
use crate::validation::{validate_choice, FieldErrors};

/// Upper bound on ids accepted by one bulk request.
pub const MAX_BULK_IDS: usize = 100;

/// Validate the id list of a bulk request: non-empty and bounded.
pub fn validate_bulk_ids(ids: &[DbId]) -> Result<(), String> {
    if ids.is_empty() {
        return Err("At least one ID is required.".to_string());
    }
    if ids.len() > MAX_BULK_IDS {
        return Err(format!(
            "Cannot perform bulk action on more than {MAX_BULK_IDS} items at once."
        ));
    }
    Ok(())
}

/// Pull a required parameter out of the request or report it by name.
fn require<T>(value: Option<T>, field: &str, action: &str) -> Result<T, FieldErrors> {
    value.ok_or_else(|| {
        FieldErrors::single(field, format!("This field is required for the {action} action."))
    })
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

pub const LEAD_BULK_ACTIONS: &[&str] = &[
    "delete",
    "restore",
    "change_status",
    "change_priority",
    "assign_contact",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadBulkAction {
    Delete,
    Restore,
    ChangeStatus(String),
    ChangePriority(String),
    AssignContact(DbId),
}

impl LeadBulkAction {
    pub fn parse(
        action: &str,
        status: Option<&str>,
        priority: Option<&str>,
        contacted_by: Option<DbId>,
    ) -> Result<Self, FieldErrors> {
        match action {
            "delete" => Ok(Self::Delete),
            "restore" => Ok(Self::Restore),
            "change_status" => {
                let status = require(status, "status", action)?;
                validate_status(status).map_err(|e| FieldErrors::single("status", e))?;
                Ok(Self::ChangeStatus(status.to_string()))
            }
            "change_priority" => {
                let priority = require(priority, "priority", action)?;
                validate_priority(priority).map_err(|e| FieldErrors::single("priority", e))?;
                Ok(Self::ChangePriority(priority.to_string()))
            }
            "assign_contact" => {
                let admin_id = require(contacted_by, "contacted_by", action)?;
                Ok(Self::AssignContact(admin_id))
            }
            other => Err(unknown_action(other, LEAD_BULK_ACTIONS)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::ChangeStatus(_) => "change_status",
            Self::ChangePriority(_) => "change_priority",
            Self::AssignContact(_) => "assign_contact",
        }
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub const PROJECT_BULK_ACTIONS: &[&str] =
    &["delete", "restore", "feature", "unfeature", "change_status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectBulkAction {
    Delete,
    Restore,
    Feature,
    Unfeature,
    ChangeStatus(String),
}

impl ProjectBulkAction {
    pub fn parse(action: &str, status: Option<&str>) -> Result<Self, FieldErrors> {
        match action {
            "delete" => Ok(Self::Delete),
            "restore" => Ok(Self::Restore),
            "feature" => Ok(Self::Feature),
            "unfeature" => Ok(Self::Unfeature),
            "change_status" => {
                let status = require(status, "status", action)?;
                validate_project_status(status).map_err(|e| FieldErrors::single("status", e))?;
                Ok(Self::ChangeStatus(status.to_string()))
            }
            other => Err(unknown_action(other, PROJECT_BULK_ACTIONS)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::Feature => "feature",
            Self::Unfeature => "unfeature",
            Self::ChangeStatus(_) => "change_status",
        }
    }
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

pub const TESTIMONIAL_BULK_ACTIONS: &[&str] = &[
    "delete",
    "restore",
    "activate",
    "deactivate",
    "verify",
    "unverify",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestimonialBulkAction {
    Delete,
    Restore,
    Activate,
    Deactivate,
    Verify,
    Unverify,
}

impl TestimonialBulkAction {
    pub fn parse(action: &str) -> Result<Self, FieldErrors> {
        match action {
            "delete" => Ok(Self::Delete),
            "restore" => Ok(Self::Restore),
            "activate" => Ok(Self::Activate),
            "deactivate" => Ok(Self::Deactivate),
            "verify" => Ok(Self::Verify),
            "unverify" => Ok(Self::Unverify),
            other => Err(unknown_action(other, TESTIMONIAL_BULK_ACTIONS)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Verify => "verify",
            Self::Unverify => "unverify",
        }
    }
}

fn unknown_action(action: &str, allowed: &[&str]) -> FieldErrors {
    let message = validate_choice(action, allowed, "action")
        .err()
        .unwrap_or_else(|| format!("Unknown action '{action}'"));
    FieldErrors::single("action", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn bulk_ids_bounds() {
        assert!(validate_bulk_ids(&[]).is_err());
        assert!(validate_bulk_ids(&[1, 2, 3]).is_ok());
        let many: Vec<DbId> = (1..=101).collect();
        assert!(validate_bulk_ids(&many).is_err());
        let max: Vec<DbId> = (1..=100).collect();
        assert!(validate_bulk_ids(&max).is_ok());
    }

    #[test]
    fn lead_change_status_requires_status() {
        let err = LeadBulkAction::parse("change_status", None, None, None).unwrap_err();
        assert!(err.contains("status"));
    }

    #[test]
    fn lead_change_status_validates_value() {
        let err = LeadBulkAction::parse("change_status", Some("won"), None, None).unwrap_err();
        assert!(err.messages("status")[0].contains("Must be one of"));
    }

    #[test]
    fn lead_actions_parse() {
        assert_matches!(
            LeadBulkAction::parse("change_priority", None, Some("high"), None),
            Ok(LeadBulkAction::ChangePriority(p)) if p == "high"
        );
        assert_matches!(
            LeadBulkAction::parse("assign_contact", None, None, Some(7)),
            Ok(LeadBulkAction::AssignContact(7))
        );
        assert_matches!(
            LeadBulkAction::parse("delete", None, None, None),
            Ok(LeadBulkAction::Delete)
        );
    }

    #[test]
    fn lead_assign_requires_admin() {
        let err = LeadBulkAction::parse("assign_contact", None, None, None).unwrap_err();
        assert!(err.contains("contacted_by"));
    }

    #[test]
    fn unknown_action_is_reported_on_action_field() {
        let err = LeadBulkAction::parse("archive", None, None, None).unwrap_err();
        assert!(err.messages("action")[0].contains("delete, restore"));
        assert!(TestimonialBulkAction::parse("feature").is_err());
    }

    #[test]
    fn project_change_status() {
        assert_matches!(
            ProjectBulkAction::parse("change_status", Some("ongoing")),
            Ok(ProjectBulkAction::ChangeStatus(s)) if s == "ongoing"
        );
        assert!(ProjectBulkAction::parse("change_status", Some("sold")).is_err());
        assert!(ProjectBulkAction::parse("change_status", None).is_err());
    }

    #[test]
    fn names_round_trip_through_parse() {
        for name in TESTIMONIAL_BULK_ACTIONS {
            assert_eq!(TestimonialBulkAction::parse(name).unwrap().name(), *name);
        }
    }
}
