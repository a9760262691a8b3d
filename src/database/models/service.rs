use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateService {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub order_index: Option<i32>,
}

impl Service {
    /// Explicit order key first; ties fall back to newest-created.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, StoreError> {
        let rows = sqlx::query_as::<_, Self>(
            "SELECT * FROM services ORDER BY order_index ASC, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, StoreError> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id_404(pool: &PgPool, id: Uuid) -> Result<Self, StoreError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| StoreError::NotFound("Service not found".to_string()))
    }

    pub async fn create(pool: &PgPool, data: &CreateService) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO services (title, description, image_url, order_index)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(data.order_index)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: &UpdateService) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE services
             SET title       = COALESCE($2, title),
                 description = COALESCE($3, description),
                 image_url   = COALESCE($4, image_url),
                 order_index = COALESCE($5, order_index),
                 updated_at  = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(data.order_index)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Service not found".to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Service not found".to_string()));
        }
        Ok(())
    }
}
