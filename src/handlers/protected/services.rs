use axum::{extract::Path, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::admin::draft::{validate_service, validate_service_update};
use crate::cache::{page_cache, routes};
use crate::database::models::{CreateService, Service, UpdateService};
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

async fn invalidate(id: Option<Uuid>) {
    page_cache()
        .invalidate_many(&[routes::SERVICES, routes::ADMIN_SERVICES])
        .await;
    // Detail pages are cached per id
    if let Some(id) = id {
        page_cache().invalidate(&routes::service_detail(&id.to_string())).await;
    }
}

/// GET /api/admin/services
pub async fn list() -> ApiResult<Vec<Service>> {
    let pool = Store::pool().await?;
    let services = Service::list(&pool).await?;
    Ok(ApiResponse::success(services))
}

/// GET /api/admin/services/:id
pub async fn show(Path(id): Path<Uuid>) -> ApiResult<Service> {
    let pool = Store::pool().await?;
    let service = Service::find_by_id_404(&pool, id).await?;
    Ok(ApiResponse::success(service))
}

/// POST /api/admin/services
pub async fn create(Json(payload): Json<CreateService>) -> ApiResult<Service> {
    validate_service(&payload)?;

    let pool = Store::pool().await?;
    let service = Service::create(&pool, &payload).await?;

    invalidate(None).await;

    Ok(ApiResponse::created(service))
}

/// PUT /api/admin/services/:id
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<UpdateService>) -> ApiResult<Service> {
    validate_service_update(&payload)?;

    let pool = Store::pool().await?;
    let service = Service::update(&pool, id, &payload).await?;

    invalidate(Some(id)).await;

    Ok(ApiResponse::success(service))
}

/// DELETE /api/admin/services/:id
pub async fn destroy(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    Service::delete(&pool, id).await?;

    invalidate(Some(id)).await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
