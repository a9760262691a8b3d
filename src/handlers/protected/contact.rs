use axum::extract::Path;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::cache::{page_cache, routes};
use crate::database::models::ContactSubmission;
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/contact-submissions - newest first
pub async fn list() -> ApiResult<Vec<ContactSubmission>> {
    let pool = Store::pool().await?;
    let submissions = ContactSubmission::list(&pool).await?;
    Ok(ApiResponse::success(submissions))
}

/// DELETE /api/admin/contact-submissions/:id - submissions are append-only,
/// so delete is the only mutation here
pub async fn destroy(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    ContactSubmission::delete(&pool, id).await?;

    page_cache().invalidate(routes::ADMIN_CONTACT_SUBMISSIONS).await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
