//! Repository for the `system_status` singleton (row `id = 1`).

use sqlx::PgPool;

use crate::models::system_status::{SystemStatus, UpdateSystemStatus};

const COLUMNS: &str = "site_name, site_url, website_status, whatsapp_integration_active, \
    contact_forms_working, last_backup_at, auto_backup_enabled, session_timeout, \
    maintenance_mode, maintenance_message, email_notifications_enabled, notification_email, \
    meta_title, meta_description, meta_keywords, created_at, updated_at";

pub struct SystemStatusRepo;

impl SystemStatusRepo {
    pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO system_status (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Fetch the singleton, creating it with defaults if absent.
    pub async fn get_current(pool: &PgPool) -> Result<SystemStatus, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM system_status WHERE id = 1");
        sqlx::query_as::<_, SystemStatus>(&query)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateSystemStatus,
    ) -> Result<SystemStatus, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!(
            "UPDATE system_status SET
                site_name = COALESCE($1, site_name),
                site_url = COALESCE($2, site_url),
                website_status = COALESCE($3, website_status),
                whatsapp_integration_active = COALESCE($4, whatsapp_integration_active),
                contact_forms_working = COALESCE($5, contact_forms_working),
                auto_backup_enabled = COALESCE($6, auto_backup_enabled),
                session_timeout = COALESCE($7, session_timeout),
                maintenance_mode = COALESCE($8, maintenance_mode),
                maintenance_message = COALESCE($9, maintenance_message),
                email_notifications_enabled = COALESCE($10, email_notifications_enabled),
                notification_email = COALESCE($11, notification_email),
                meta_title = COALESCE($12, meta_title),
                meta_description = COALESCE($13, meta_description),
                meta_keywords = COALESCE($14, meta_keywords)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemStatus>(&query)
            .bind(&input.site_name)
            .bind(&input.site_url)
            .bind(input.website_status)
            .bind(input.whatsapp_integration_active)
            .bind(input.contact_forms_working)
            .bind(input.auto_backup_enabled)
            .bind(input.session_timeout)
            .bind(input.maintenance_mode)
            .bind(&input.maintenance_message)
            .bind(input.email_notifications_enabled)
            .bind(&input.notification_email)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .fetch_one(pool)
            .await
    }

    /// Record that a backup was taken now.
    pub async fn record_backup(pool: &PgPool) -> Result<SystemStatus, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!(
            "UPDATE system_status SET last_backup_at = NOW() WHERE id = 1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemStatus>(&query)
            .fetch_one(pool)
            .await
    }
}
