//! Repository for the `contact_settings` singleton (row `id = 1`).

use sqlx::PgPool;

use crate::models::contact_settings::{ContactSettings, UpdateContactSettings};

const COLUMNS: &str = "whatsapp_enabled, whatsapp_number, whatsapp_business_hours, \
    whatsapp_auto_reply, primary_phone, secondary_phone, toll_free_number, \
    phone_business_hours, info_email, sales_email, support_email, email_auto_reply_enabled, \
    email_auto_reply_subject, email_auto_reply_message, street_address, area_locality, city, \
    state, pincode, country, google_maps_embed, facebook_url, instagram_url, twitter_url, \
    linkedin_url, youtube_url, created_at, updated_at";

pub struct ContactSettingsRepo;

impl ContactSettingsRepo {
    pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO contact_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Fetch the singleton, creating it with defaults if absent.
    pub async fn get_current(pool: &PgPool) -> Result<ContactSettings, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM contact_settings WHERE id = 1");
        sqlx::query_as::<_, ContactSettings>(&query)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateContactSettings,
    ) -> Result<ContactSettings, sqlx::Error> {
        Self::ensure(pool).await?;
        let query = format!(
            "UPDATE contact_settings SET
                whatsapp_enabled = COALESCE($1, whatsapp_enabled),
                whatsapp_number = COALESCE($2, whatsapp_number),
                whatsapp_business_hours = COALESCE($3, whatsapp_business_hours),
                whatsapp_auto_reply = COALESCE($4, whatsapp_auto_reply),
                primary_phone = COALESCE($5, primary_phone),
                secondary_phone = COALESCE($6, secondary_phone),
                toll_free_number = COALESCE($7, toll_free_number),
                phone_business_hours = COALESCE($8, phone_business_hours),
                info_email = COALESCE($9, info_email),
                sales_email = COALESCE($10, sales_email),
                support_email = COALESCE($11, support_email),
                email_auto_reply_enabled = COALESCE($12, email_auto_reply_enabled),
                email_auto_reply_subject = COALESCE($13, email_auto_reply_subject),
                email_auto_reply_message = COALESCE($14, email_auto_reply_message),
                street_address = COALESCE($15, street_address),
                area_locality = COALESCE($16, area_locality),
                city = COALESCE($17, city),
                state = COALESCE($18, state),
                pincode = COALESCE($19, pincode),
                country = COALESCE($20, country),
                google_maps_embed = COALESCE($21, google_maps_embed),
                facebook_url = COALESCE($22, facebook_url),
                instagram_url = COALESCE($23, instagram_url),
                twitter_url = COALESCE($24, twitter_url),
                linkedin_url = COALESCE($25, linkedin_url),
                youtube_url = COALESCE($26, youtube_url)
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactSettings>(&query)
            .bind(input.whatsapp_enabled)
            .bind(&input.whatsapp_number)
            .bind(&input.whatsapp_business_hours)
            .bind(&input.whatsapp_auto_reply)
            .bind(&input.primary_phone)
            .bind(&input.secondary_phone)
            .bind(&input.toll_free_number)
            .bind(&input.phone_business_hours)
            .bind(&input.info_email)
            .bind(&input.sales_email)
            .bind(&input.support_email)
            .bind(input.email_auto_reply_enabled)
            .bind(&input.email_auto_reply_subject)
            .bind(&input.email_auto_reply_message)
            .bind(&input.street_address)
            .bind(&input.area_locality)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.pincode)
            .bind(&input.country)
            .bind(&input.google_maps_embed)
            .bind(&input.facebook_url)
            .bind(&input.instagram_url)
            .bind(&input.twitter_url)
            .bind(&input.linkedin_url)
            .bind(&input.youtube_url)
            .fetch_one(pool)
            .await
    }
}
