//! Well-known admin role names.
//!
//! These must match the defaults in `20260301000002_create_admin_users.sql`.

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_SUPER_ADMIN: &str = "Super Admin";

/// Roles that grant access to the admin API.
pub const ADMIN_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SUPER_ADMIN];

/// Whether `role` is allowed to use the admin API.
pub fn is_admin_role(role: &str) -> bool {
    ADMIN_ROLES.contains(&role)
}
