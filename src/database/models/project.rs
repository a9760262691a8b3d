use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::filter::{Audience, ProjectFilter};
use crate::database::manager::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub client: String,
    pub location: String,
    pub completion_date: String,
    pub category: String,
    /// Order-significant; appends go to the tail, removals close the gap.
    pub images: Vec<String>,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub completion_date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub completion_date: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
}

impl Project {
    /// List projects for the given audience. Public callers only ever see
    /// published rows; admin callers see drafts unless the filter narrows.
    pub async fn list(
        pool: &PgPool,
        audience: Audience,
        filter: &ProjectFilter,
    ) -> Result<Vec<Self>, StoreError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");
        filter.push_where(audience, &mut builder);
        builder.push(" ORDER BY completion_date DESC, created_at DESC");

        let rows = builder.build_query_as::<Self>().fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, StoreError> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id_404(pool: &PgPool, id: Uuid) -> Result<Self, StoreError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| StoreError::NotFound("Project not found".to_string()))
    }

    pub async fn create(pool: &PgPool, data: &CreateProject) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO projects
                 (title, description, client, location, completion_date, category, images, featured, published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.client)
        .bind(&data.location)
        .bind(&data.completion_date)
        .bind(&data.category)
        .bind(&data.images)
        .bind(data.featured)
        .bind(data.published)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: &UpdateProject) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE projects
             SET title           = COALESCE($2, title),
                 description     = COALESCE($3, description),
                 client          = COALESCE($4, client),
                 location        = COALESCE($5, location),
                 completion_date = COALESCE($6, completion_date),
                 category        = COALESCE($7, category),
                 images          = COALESCE($8, images),
                 featured        = COALESCE($9, featured),
                 published       = COALESCE($10, published),
                 updated_at      = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.client)
        .bind(&data.location)
        .bind(&data.completion_date)
        .bind(&data.category)
        .bind(&data.images)
        .bind(data.featured)
        .bind(data.published)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Project not found".to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }

    /// Append an image URL to the tail of the image list. A single statement,
    /// so concurrent appends never drop or reorder existing entries.
    pub async fn append_image(pool: &PgPool, id: Uuid, url: &str) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE projects
             SET images = array_append(images, $2), updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Project not found".to_string()))
    }

    /// Remove the image at a zero-based index; later entries shift down.
    pub async fn remove_image(pool: &PgPool, id: Uuid, index: i32) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE projects
             SET images = images[1:$2] || images[$2 + 2:], updated_at = now()
             WHERE id = $1 AND $2 >= 0 AND cardinality(images) > $2
             RETURNING *",
        )
        .bind(id)
        .bind(index)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Project or image index not found".to_string()))
    }
}
