use axum::Json;

use crate::admin::draft::validate_site_settings;
use crate::cache::{page_cache, routes};
use crate::database::models::{SiteSettings, UpdateSiteSettings};
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/settings
pub async fn show() -> ApiResult<SiteSettings> {
    let pool = Store::pool().await?;
    let settings = SiteSettings::get(&pool).await?;
    Ok(ApiResponse::success(settings))
}

/// PUT /api/admin/settings - updates the singleton row, never creates one
pub async fn update(Json(payload): Json<UpdateSiteSettings>) -> ApiResult<SiteSettings> {
    validate_site_settings(&payload)?;

    let pool = Store::pool().await?;
    let settings = SiteSettings::update(&pool, &payload).await?;

    // Settings feed every page's chrome, so the whole public surface goes stale
    page_cache().invalidate_many(routes::ALL_PUBLIC).await;

    Ok(ApiResponse::success(settings))
}
