//! Repository for the `admin_sessions` table.
//!
//! A refresh token is valid while its session row is neither revoked nor
//! expired; revoking the row is how tokens are blacklisted.

use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{AdminSession, CreateSession};

const COLUMNS: &str = "id, admin_id, refresh_token_hash, expires_at, is_revoked, \
                       user_agent, ip_address, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (admin_id, refresh_token_hash, expires_at, user_agent, ip_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(input.admin_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Find a live session by its refresh token hash.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Live sessions of one admin, newest first.
    pub async fn list_active_for_admin(
        pool: &PgPool,
        admin_id: DbId,
    ) -> Result<Vec<AdminSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_sessions
             WHERE admin_id = $1 AND is_revoked = false AND expires_at > NOW()
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(admin_id)
            .fetch_all(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke the session holding `hash`, if it belongs to `admin_id`.
    pub async fn revoke_by_hash(
        pool: &PgPool,
        admin_id: DbId,
        hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1 AND admin_id = $2 AND is_revoked = false",
        )
        .bind(hash)
        .bind(admin_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active sessions for an admin. Returns the count of revoked sessions.
    pub async fn revoke_all_for_admin(pool: &PgPool, admin_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET is_revoked = true
             WHERE admin_id = $1 AND is_revoked = false",
        )
        .bind(admin_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired or revoked sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM admin_sessions WHERE expires_at < NOW() OR is_revoked = true")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
