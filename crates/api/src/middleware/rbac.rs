//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use greenhomes_core::error::CoreError;
use greenhomes_core::roles::is_admin_role;
use greenhomes_db::repositories::AdminUserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an admin role and an account that is still active.
///
/// Rejects with 401 when the token is missing or invalid, and 403 when the
/// role is not an admin role or the account has been deactivated.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Envelope<()>> {
///     Ok(message("ok"))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin_role(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        if !AdminUserRepo::exists_active(&state.pool, user.user_id).await? {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is deactivated".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
