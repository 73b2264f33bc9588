//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Decodes the JWT Bearer token.
//! - [`auth::OptionalAdmin`] -- An admin when a valid admin token is sent, else anonymous.
//! - [`rbac::RequireAdmin`] -- Requires an active admin account.

pub mod auth;
pub mod rbac;
