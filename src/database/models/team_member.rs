use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl TeamMember {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, StoreError> {
        let rows = sqlx::query_as::<_, Self>("SELECT * FROM team_members ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, StoreError> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM team_members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id_404(pool: &PgPool, id: Uuid) -> Result<Self, StoreError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| StoreError::NotFound("Team member not found".to_string()))
    }

    pub async fn create(pool: &PgPool, data: &CreateTeamMember) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO team_members (name, role, bio, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.role)
        .bind(&data.bio)
        .bind(&data.image_url)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: &UpdateTeamMember) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE team_members
             SET name      = COALESCE($2, name),
                 role      = COALESCE($3, role),
                 bio       = COALESCE($4, bio),
                 image_url = COALESCE($5, image_url),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.role)
        .bind(&data.bio)
        .bind(&data.image_url)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Team member not found".to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Team member not found".to_string()));
        }
        Ok(())
    }
}
