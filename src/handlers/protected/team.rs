use axum::{extract::Path, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::activity::{feed, ChangeEvent};
use crate::admin::draft::{validate_team_member, validate_team_member_update};
use crate::cache::{page_cache, routes};
use crate::database::models::{CreateTeamMember, TeamMember, UpdateTeamMember};
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

// Pages that render team members
const AFFECTED_ROUTES: &[&str] = &[routes::ABOUT, routes::ADMIN_TEAM];

/// GET /api/admin/team - full collection, admin-scoped
pub async fn list() -> ApiResult<Vec<TeamMember>> {
    let pool = Store::pool().await?;
    let members = TeamMember::list(&pool).await?;
    Ok(ApiResponse::success(members))
}

/// GET /api/admin/team/:id
pub async fn show(Path(id): Path<Uuid>) -> ApiResult<TeamMember> {
    let pool = Store::pool().await?;
    let member = TeamMember::find_by_id_404(&pool, id).await?;
    Ok(ApiResponse::success(member))
}

/// POST /api/admin/team
pub async fn create(Json(payload): Json<CreateTeamMember>) -> ApiResult<TeamMember> {
    validate_team_member(&payload)?;

    let pool = Store::pool().await?;
    let member = TeamMember::create(&pool, &payload).await?;

    // Write has committed; now the cached pages go stale
    page_cache().invalidate_many(AFFECTED_ROUTES).await;
    feed().publish(ChangeEvent::TeamMemberCreated(member.clone())).await;

    Ok(ApiResponse::created(member))
}

/// PUT /api/admin/team/:id
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<UpdateTeamMember>) -> ApiResult<TeamMember> {
    validate_team_member_update(&payload)?;

    let pool = Store::pool().await?;
    let member = TeamMember::update(&pool, id, &payload).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(member))
}

/// DELETE /api/admin/team/:id
pub async fn destroy(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    TeamMember::delete(&pool, id).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}
