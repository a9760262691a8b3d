use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use crate::database::manager::StoreError;

/// Singleton site chrome. The table holds exactly one row (enforced by a
/// fixed-id CHECK and seeded by the migration); reads and writes always
/// address that row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteSettings {
    pub id: i32,
    pub site_title: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub office_address: String,
    pub logo_url: String,
    pub favicon_url: String,
    /// Map of social platform -> profile URL
    pub social_links: Value,
    pub maintenance_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSiteSettings {
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub office_address: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub social_links: Option<Value>,
    pub maintenance_mode: Option<bool>,
}

const SINGLETON_ID: i32 = 1;

impl SiteSettings {
    pub async fn get(pool: &PgPool) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM site_settings WHERE id = $1")
            .bind(SINGLETON_ID)
            .fetch_optional(pool)
            .await?;
        row.ok_or_else(|| StoreError::NotFound("Site settings not found".to_string()))
    }

    /// Update the singleton row; never creates a second one.
    pub async fn update(pool: &PgPool, data: &UpdateSiteSettings) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE site_settings
             SET site_title       = COALESCE($2, site_title),
                 site_description = COALESCE($3, site_description),
                 contact_email    = COALESCE($4, contact_email),
                 contact_phone    = COALESCE($5, contact_phone),
                 office_address   = COALESCE($6, office_address),
                 logo_url         = COALESCE($7, logo_url),
                 favicon_url      = COALESCE($8, favicon_url),
                 social_links     = COALESCE($9, social_links),
                 maintenance_mode = COALESCE($10, maintenance_mode),
                 updated_at       = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(SINGLETON_ID)
        .bind(&data.site_title)
        .bind(&data.site_description)
        .bind(&data.contact_email)
        .bind(&data.contact_phone)
        .bind(&data.office_address)
        .bind(&data.logo_url)
        .bind(&data.favicon_url)
        .bind(&data.social_links)
        .bind(data.maintenance_mode)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Site settings not found".to_string()))
    }
}
