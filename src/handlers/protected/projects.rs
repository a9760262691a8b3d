use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::activity::{feed, ChangeEvent};
use crate::admin::draft::{validate_project, validate_project_update};
use crate::cache::{page_cache, routes};
use crate::database::models::{CreateProject, Project, UpdateProject};
use crate::database::{Audience, ProjectFilter, Store};
use crate::middleware::{ApiResponse, ApiResult};

const AFFECTED_ROUTES: &[&str] = &[routes::PROJECTS, routes::ADMIN_PROJECTS];

#[derive(Debug, Deserialize)]
pub struct AdminProjectsQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub year: Option<String>,
    pub featured: Option<bool>,
    /// Absent means all rows, drafts included - the admin default
    pub published: Option<bool>,
}

/// GET /api/admin/projects - every row, drafts included, unless narrowed
pub async fn list(Query(query): Query<AdminProjectsQuery>) -> ApiResult<Vec<Project>> {
    let filter = ProjectFilter {
        category: query.category,
        location: query.location,
        year: query.year,
        featured: query.featured,
        published: query.published,
    };

    let pool = Store::pool().await?;
    let projects = Project::list(&pool, Audience::Admin, &filter).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /api/admin/projects/:id
pub async fn show(Path(id): Path<Uuid>) -> ApiResult<Project> {
    let pool = Store::pool().await?;
    let project = Project::find_by_id_404(&pool, id).await?;
    Ok(ApiResponse::success(project))
}

/// POST /api/admin/projects
pub async fn create(Json(payload): Json<CreateProject>) -> ApiResult<Project> {
    validate_project(&payload)?;

    let pool = Store::pool().await?;
    let project = Project::create(&pool, &payload).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;
    feed().publish(ChangeEvent::ProjectCreated(project.clone())).await;

    Ok(ApiResponse::created(project))
}

/// PUT /api/admin/projects/:id
pub async fn update(Path(id): Path<Uuid>, Json(payload): Json<UpdateProject>) -> ApiResult<Project> {
    validate_project_update(&payload)?;

    let pool = Store::pool().await?;
    let project = Project::update(&pool, id, &payload).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(project))
}

/// DELETE /api/admin/projects/:id
pub async fn destroy(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    Project::delete(&pool, id).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(json!({ "deleted": id })))
}

#[derive(Debug, Deserialize)]
pub struct RemoveImageRequest {
    pub index: i32,
}

/// DELETE /api/admin/projects/:id/images - drop one image by position;
/// later entries shift down with no gaps
pub async fn remove_image(Path(id): Path<Uuid>, Json(payload): Json<RemoveImageRequest>) -> ApiResult<Project> {
    let pool = Store::pool().await?;
    let project = Project::remove_image(&pool, id, payload.index).await?;

    page_cache().invalidate_many(AFFECTED_ROUTES).await;

    Ok(ApiResponse::success(project))
}
