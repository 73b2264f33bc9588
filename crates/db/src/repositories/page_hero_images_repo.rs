//! Repository for the `page_hero_images` singleton (row `id = 1`).

use greenhomes_core::types::DbId;
use sqlx::PgPool;

use crate::models::page_hero_images::{PageHeroImages, UpdatePageHeroImages};

const COLUMNS: &str = "projects_hero_image, about_hero_image, contact_hero_image, \
                       about_our_story_image, updated_by, created_at, updated_at";

pub struct PageHeroImagesRepo;

impl PageHeroImagesRepo {
    pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO page_hero_images (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn get_current(pool: &PgPool) -> Result<PageHeroImages, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM page_hero_images WHERE id = 1");
        sqlx::query_as::<_, PageHeroImages>(&query)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdatePageHeroImages,
        updated_by: Option<DbId>,
    ) -> Result<PageHeroImages, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!(
            "UPDATE page_hero_images SET
                projects_hero_image = COALESCE($1, projects_hero_image),
                about_hero_image = COALESCE($2, about_hero_image),
                contact_hero_image = COALESCE($3, contact_hero_image),
                about_our_story_image = COALESCE($4, about_our_story_image),
                updated_by = COALESCE($5, updated_by)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageHeroImages>(&query)
            .bind(&input.projects_hero_image)
            .bind(&input.about_hero_image)
            .bind(&input.contact_hero_image)
            .bind(&input.about_our_story_image)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }
}
