use axum::{extract::Path, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::admin::draft::{validate_gallery_item, validate_gallery_item_update};
use crate::cache::{page_cache, routes};
use crate::database::models::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

const AFFECTED_ROUTES: &[&str] = &[routes::GALLERY, routes::ADMIN_GALLERY];

/// GET /api/admin/gallery
pub async fn list() -> ApiResult<Vec<GalleryItem>> {
    let pool = Store::pool().await?;
    let items = GalleryItem::list(&pool, None).await?;
    Ok(ApiResponse::success(items))
}

/// GET /api/admin/gallery/:id
pub async fn show(Path(id): Path<Uuid>) -> ApiResult<GalleryItem> {
    let pool = Store::pool().await?;
    let item = GalleryItem::find_by_id_404(&pool, id).await?;
    Ok(ApiResponse::success(item))
}

/// POST /api/admin/gallery
pub async fn create(Json(payload): Json<CreateGalleryItem>) -> ApiResult<GalleryItem> {
    validate_gallery_item(&payload)?;

    let pool = Store::pool().await?;
    let item = GalleryItem::create(&pool, &payload).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::created(item))
}

/// PUT /api/admin/gallery/:id
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<UpdateGalleryItem>) -> ApiResult<GalleryItem> {
    validate_gallery_item_update(&payload)?;

    let pool = Store::pool().await?;
    let item = GalleryItem::update(&pool, id, &payload).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(item))
}

/// DELETE /api/admin/gallery/:id
pub async fn destroy(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    GalleryItem::delete(&pool, id).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
