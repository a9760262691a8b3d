use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::filter::Audience;
use crate::database::manager::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: String,
    pub author: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
}

impl BlogPost {
    /// Public callers only ever see published posts; admin sees drafts too.
    pub async fn list(pool: &PgPool, audience: Audience) -> Result<Vec<Self>, StoreError> {
        let rows = match audience {
            Audience::Public => {
                sqlx::query_as::<_, Self>(
                    "SELECT * FROM blog_posts WHERE published = TRUE
                     ORDER BY published_at DESC NULLS LAST",
                )
                .fetch_all(pool)
                .await?
            }
            Audience::Admin => {
                sqlx::query_as::<_, Self>(
                    "SELECT * FROM blog_posts
                     ORDER BY published_at DESC NULLS LAST, created_at DESC",
                )
                .fetch_all(pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, StoreError> {
        let row = sqlx::query_as::<_, Self>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id_404(pool: &PgPool, id: Uuid) -> Result<Self, StoreError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| StoreError::NotFound("Blog post not found".to_string()))
    }

    /// The publication timestamp is server-stamped when the post goes out
    /// published; drafts get one on the update that first publishes them.
    pub async fn create(pool: &PgPool, data: &CreateBlogPost) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "INSERT INTO blog_posts (title, content, excerpt, featured_image, author, published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 THEN now() END)
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.excerpt)
        .bind(&data.featured_image)
        .bind(&data.author)
        .bind(data.published)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: &UpdateBlogPost) -> Result<Self, StoreError> {
        let row = sqlx::query_as::<_, Self>(
            "UPDATE blog_posts
             SET title          = COALESCE($2, title),
                 content        = COALESCE($3, content),
                 excerpt        = COALESCE($4, excerpt),
                 featured_image = COALESCE($5, featured_image),
                 author         = COALESCE($6, author),
                 published      = COALESCE($7, published),
                 published_at   = CASE
                     WHEN COALESCE($7, published) AND published_at IS NULL THEN now()
                     ELSE published_at
                 END,
                 updated_at     = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.excerpt)
        .bind(&data.featured_image)
        .bind(&data.author)
        .bind(data.published)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| StoreError::NotFound("Blog post not found".to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Blog post not found".to_string()));
        }
        Ok(())
    }
}
