//! System status rules.

use serde::Serialize;

pub const DEFAULT_SITE_NAME: &str = "HSR Green Homes";

/// Admin session timeout bounds, in minutes.
pub const MIN_SESSION_TIMEOUT_MINS: i32 = 5;
pub const MAX_SESSION_TIMEOUT_MINS: i32 = 1440;

pub fn validate_session_timeout(minutes: i32) -> Result<(), String> {
    if !(MIN_SESSION_TIMEOUT_MINS..=MAX_SESSION_TIMEOUT_MINS).contains(&minutes) {
        return Err(format!(
            "Session timeout must be between {MIN_SESSION_TIMEOUT_MINS} and {MAX_SESSION_TIMEOUT_MINS} minutes."
        ));
    }
    Ok(())
}

/// Human-readable health summary derived from the status flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UptimeStatus {
    pub website: &'static str,
    pub whatsapp: &'static str,
    pub forms: &'static str,
    pub maintenance: &'static str,
}

impl UptimeStatus {
    pub fn from_flags(
        website_up: bool,
        whatsapp_active: bool,
        forms_working: bool,
        maintenance_mode: bool,
    ) -> Self {
        Self {
            website: if website_up { "Online" } else { "Offline" },
            whatsapp: if whatsapp_active { "Active" } else { "Inactive" },
            forms: if forms_working { "Working" } else { "Not Working" },
            maintenance: if maintenance_mode { "Enabled" } else { "Disabled" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_labels() {
        let status = UptimeStatus::from_flags(true, false, true, false);
        assert_eq!(status.website, "Online");
        assert_eq!(status.whatsapp, "Inactive");
        assert_eq!(status.forms, "Working");
        assert_eq!(status.maintenance, "Disabled");
    }

    #[test]
    fn session_timeout_range() {
        assert!(validate_session_timeout(30).is_ok());
        assert!(validate_session_timeout(2).is_err());
        assert!(validate_session_timeout(2000).is_err());
    }
}
