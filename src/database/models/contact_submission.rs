use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::StoreError;

/// Append-only: the public contact form creates rows, admins delete them,
/// nothing ever updates one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, StoreError> {
        let rows = sqlx::query_as::<_, Self>(
            "SELECT * FROM contact_submissions ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(pool: &PgPool, data: &CreateContactSubmission) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO contact_submissions (name, email, phone, message)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.message)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Contact submission not found".to_string()));
        }
        Ok(())
    }
}
