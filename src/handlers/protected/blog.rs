use axum::{extract::Path, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::activity::{feed, ChangeEvent};
use crate::admin::draft::{validate_blog_post, validate_blog_post_update};
use crate::cache::{page_cache, routes};
use crate::database::models::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::database::{Audience, Store};
use crate::middleware::{ApiResponse, ApiResult};

async fn invalidate(id: Option<Uuid>) {
    page_cache().invalidate_many(&[routes::BLOG, routes::ADMIN_BLOG]).await;
    if let Some(id) = id {
        page_cache().invalidate(&routes::blog_detail(&id.to_string())).await;
    }
}

/// GET /api/admin/blog - drafts and published posts alike
pub async fn list() -> ApiResult<Vec<BlogPost>> {
    let pool = Store::pool().await?;
    let posts = BlogPost::list(&pool, Audience::Admin).await?;
    Ok(ApiResponse::success(posts))
}

/// GET /api/admin/blog/:id
pub async fn show(Path(id): Path<Uuid>) -> ApiResult<BlogPost> {
    let pool = Store::pool().await?;
    let post = BlogPost::find_by_id_404(&pool, id).await?;
    Ok(ApiResponse::success(post))
}

/// POST /api/admin/blog
pub async fn create(Json(payload): Json<CreateBlogPost>) -> ApiResult<BlogPost> {
    validate_blog_post(&payload)?;

    let pool = Store::pool().await?;
    let post = BlogPost::create(&pool, &payload).await?;

    invalidate(None).await;
    // Drafts stay out of the feed; format_change skips them
    feed().publish(ChangeEvent::BlogPostCreated(post.clone())).await;

    Ok(ApiResponse::created(post))
}

/// PUT /api/admin/blog/:id
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<UpdateBlogPost>) -> ApiResult<BlogPost> {
    validate_blog_post_update(&payload)?;

    let pool = Store::pool().await?;
    let post = BlogPost::update(&pool, id, &payload).await?;

    invalidate(Some(id)).await;

    Ok(ApiResponse::success(post))
}

/// DELETE /api/admin/blog/:id
pub async fn destroy(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    BlogPost::delete(&pool, id).await?;

    invalidate(Some(id)).await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
