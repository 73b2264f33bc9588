//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::DateTime;
use greenhomes_core::error::CoreError;
use greenhomes_core::roles::is_admin_role;
use greenhomes_core::types::{DbId, Timestamp};
use greenhomes_db::repositories::AdminUserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identified by a valid JWT Bearer token in the `Authorization` header.
///
/// Only the signature and expiry are checked here; [`RequireAdmin`](super::rbac::RequireAdmin)
/// additionally confirms the account is still active.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The admin's database id (from `claims.sub`).
    pub user_id: DbId,
    /// The admin's role name.
    pub role: String,
    pub issued_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Authentication credentials were not provided".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            issued_at: DateTime::from_timestamp(claims.iat, 0),
            expires_at: DateTime::from_timestamp(claims.exp, 0),
        })
    }
}

/// An active admin when the request carries a valid admin token, otherwise
/// `None`. Public endpoints use this to widen what admins can see; a bad or
/// missing token never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalAdmin(pub Option<AuthUser>);

impl OptionalAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequestParts<AppState> for OptionalAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(OptionalAdmin(None));
        }
        let Ok(user) = AuthUser::from_request_parts(parts, state).await else {
            return Ok(OptionalAdmin(None));
        };
        if !is_admin_role(&user.role) {
            return Ok(OptionalAdmin(None));
        }
        let active = AdminUserRepo::exists_active(&state.pool, user.user_id).await?;
        Ok(OptionalAdmin(active.then_some(user)))
    }
}
