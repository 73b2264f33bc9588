//! Repository for the `homepage_content` singleton.
//!
//! The table holds at most one row pinned to `id = 1`. [`HomePageRepo::get_current`]
//! materialises it with column defaults through `ON CONFLICT DO NOTHING`, so
//! concurrent first reads cannot create a second row.

use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::homepage::{HomePageContent, UpdateHomePageContent};

const COLUMNS: &str = "hero_title, hero_subtitle, hero_background_image, hero_cta_button_text, \
    stats_experience_value, stats_experience_label, stats_projects_value, stats_projects_label, \
    stats_families_value, stats_families_label, stats_sqft_value, stats_sqft_label, \
    footer_office_address, footer_phone_number, footer_email, footer_whatsapp_number, \
    updated_by, created_at, updated_at";

pub struct HomePageRepo;

impl HomePageRepo {
    /// Make sure the singleton row exists.
    pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO homepage_content (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Fetch the singleton, creating it with defaults if absent.
    pub async fn get_current(pool: &PgPool) -> Result<HomePageContent, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM homepage_content WHERE id = 1");
        sqlx::query_as::<_, HomePageContent>(&query)
            .fetch_one(pool)
            .await
    }

    /// Apply the non-`None` fields of `input` to the singleton.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateHomePageContent,
        updated_by: Option<DbId>,
    ) -> Result<HomePageContent, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!(
            "UPDATE homepage_content SET
                hero_title = COALESCE($1, hero_title),
                hero_subtitle = COALESCE($2, hero_subtitle),
                hero_background_image = COALESCE($3, hero_background_image),
                hero_cta_button_text = COALESCE($4, hero_cta_button_text),
                stats_experience_value = COALESCE($5, stats_experience_value),
                stats_experience_label = COALESCE($6, stats_experience_label),
                stats_projects_value = COALESCE($7, stats_projects_value),
                stats_projects_label = COALESCE($8, stats_projects_label),
                stats_families_value = COALESCE($9, stats_families_value),
                stats_families_label = COALESCE($10, stats_families_label),
                stats_sqft_value = COALESCE($11, stats_sqft_value),
                stats_sqft_label = COALESCE($12, stats_sqft_label),
                footer_office_address = COALESCE($13, footer_office_address),
                footer_phone_number = COALESCE($14, footer_phone_number),
                footer_email = COALESCE($15, footer_email),
                footer_whatsapp_number = COALESCE($16, footer_whatsapp_number),
                updated_by = COALESCE($17, updated_by)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HomePageContent>(&query)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_background_image)
            .bind(&input.hero_cta_button_text)
            .bind(&input.stats_experience_value)
            .bind(&input.stats_experience_label)
            .bind(&input.stats_projects_value)
            .bind(&input.stats_projects_label)
            .bind(&input.stats_families_value)
            .bind(&input.stats_families_label)
            .bind(&input.stats_sqft_value)
            .bind(&input.stats_sqft_label)
            .bind(&input.footer_office_address)
            .bind(&input.footer_phone_number)
            .bind(&input.footer_email)
            .bind(&input.footer_whatsapp_number)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }
}
