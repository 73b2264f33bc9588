//! Handlers for the `/auth` resource (login, refresh, logout, profile).

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use chrono::Utc;
use greenhomes_core::error::CoreError;
use greenhomes_core::types::DbId;
use greenhomes_core::validation::FieldErrors;
use greenhomes_db::models::admin_user::AdminUserResponse;
use greenhomes_db::models::session::CreateSession;
use greenhomes_db::repositories::{AdminUserRepo, SessionRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{derived_errors, AppJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{message, ok, Envelope};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: AdminUserResponse,
    pub tokens: TokenPair,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns the admin profile and a
/// fresh access/refresh token pair.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Envelope<LoginResponse>> {
    derived_errors(&input).into_result()?;

    let user = AdminUserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(admin_id = user.id, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    AdminUserRepo::record_login(&state.pool, user.id).await?;
    let tokens = issue_tokens(&state, user.id, &user.role, user_agent(&headers)).await?;

    let user = AdminUserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminUser",
            id: user.id,
        }))?;

    tracing::info!(admin_id = user.id, "Admin logged in");
    Ok(ok(
        "Login successful",
        LoginResponse {
            user: user.into(),
            tokens,
        },
    ))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new pair. The presented token is
/// revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Envelope<TokenPair>> {
    let token = required_refresh(input.refresh)?;

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &hash_refresh_token(&token))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = AdminUserRepo::find_by_id(&state.pool, session.admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let tokens = issue_tokens(&state, user.id, &user.role, user_agent(&headers)).await?;
    Ok(ok("Token refreshed", tokens))
}

/// POST /api/v1/auth/logout
///
/// Revoke the given refresh token. The access token simply expires.
pub async fn logout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Envelope<()>> {
    let token = required_refresh(input.refresh)?;

    let revoked =
        SessionRepo::revoke_by_hash(&state.pool, admin.user_id, &hash_refresh_token(&token))
            .await?;
    if !revoked {
        return Err(AppError::BadRequest("Invalid refresh token".into()));
    }

    tracing::info!(admin_id = admin.user_id, "Admin logged out");
    Ok(message("Logout successful"))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Envelope<AdminUserResponse>> {
    let user = AdminUserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminUser",
            id: admin.user_id,
        }))?;
    Ok(ok("Profile retrieved", user.into()))
}

/// POST /api/v1/auth/change-password
///
/// Every outstanding refresh token is revoked once the password changes.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<ChangePasswordRequest>,
) -> AppResult<Envelope<()>> {
    let user = AdminUserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminUser",
            id: admin.user_id,
        }))?;

    let mut errors = FieldErrors::new();
    let old_valid = verify_password(&input.old_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        errors.add("old_password", "Old password is incorrect.");
    }
    if input.new_password != input.confirm_password {
        errors.add("confirm_password", "Passwords do not match.");
    }
    if let Err(problems) = validate_password_strength(&input.new_password) {
        for problem in problems {
            errors.add("new_password", problem);
        }
    }
    errors.into_result()?;

    let hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    AdminUserRepo::update_password(&state.pool, user.id, &hash).await?;
    let revoked = SessionRepo::revoke_all_for_admin(&state.pool, user.id).await?;

    tracing::info!(admin_id = user.id, revoked, "Admin changed password");
    Ok(message("Password changed successfully"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn required_refresh(token: Option<String>) -> AppResult<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Refresh token is required".into()))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Generate access + refresh tokens and persist the session row.
async fn issue_tokens(
    state: &AppState,
    admin_id: DbId,
    role: &str,
    user_agent: Option<String>,
) -> AppResult<TokenPair> {
    let access = generate_access_token(admin_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            admin_id,
            refresh_token_hash: refresh_hash,
            expires_at,
            user_agent,
            ip_address: None,
        },
    )
    .await?;

    Ok(TokenPair { access, refresh })
}
