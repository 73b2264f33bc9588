//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing, verification and the password policy.
//! - [`jwt`] -- access-token generation/validation and refresh-token helpers.

pub mod jwt;
pub mod password;
