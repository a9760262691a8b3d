use axum::extract::{Path, Query};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::cache::{self, page_cache, routes};
use crate::database::models::{BlogPost, GalleryItem, Project, Service, SiteSettings, TeamMember};
use crate::database::{Audience, ProjectFilter, Store};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

fn to_value<T: Serialize>(data: &T) -> Result<Value, ApiError> {
    serde_json::to_value(data).map_err(|e| {
        tracing::error!("Failed to serialize content payload: {}", e);
        ApiError::internal_server_error("Failed to format response")
    })
}

/// Serve a cached public route, or render it from the store and cache it.
/// Filtered views never go through here; they always hit the store.
async fn cached_route<F, Fut>(path: &str, render: F) -> Result<Value, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Value, ApiError>>,
{
    if cache::enabled() {
        if let Some(cached) = page_cache().get(path).await {
            return Ok(cached);
        }
    }

    let payload = render().await?;

    if cache::enabled() {
        page_cache().put(path, payload.clone()).await;
    }
    Ok(payload)
}

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    pub year: Option<String>,
    pub featured: Option<bool>,
}

impl ProjectsQuery {
    fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.year.is_none() && self.featured.is_none()
    }

    fn into_filter(self) -> ProjectFilter {
        ProjectFilter {
            category: self.category,
            location: self.location,
            year: self.year,
            featured: self.featured,
            published: None,
        }
    }
}

/// GET /api/content/projects - published projects, optionally filtered
pub async fn projects_get(Query(query): Query<ProjectsQuery>) -> ApiResult<Value> {
    let unfiltered = query.is_unfiltered();
    let filter = query.into_filter();

    let render = move || async move {
        let pool = Store::pool().await?;
        let projects = Project::list(&pool, Audience::Public, &filter).await?;
        to_value(&projects)
    };

    let data = if unfiltered {
        cached_route(routes::PROJECTS, render).await?
    } else {
        render().await?
    };
    Ok(ApiResponse::success(data))
}

/// GET /api/content/projects/:id - published project detail
pub async fn project_get(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    let project = Project::find_by_id_404(&pool, id).await?;
    // Drafts do not exist as far as the public site is concerned
    if !project.published {
        return Err(ApiError::not_found("Project not found"));
    }
    Ok(ApiResponse::success(to_value(&project)?))
}

/// GET /api/content/services
pub async fn services_get() -> ApiResult<Value> {
    let data = cached_route(routes::SERVICES, || async {
        let pool = Store::pool().await?;
        let services = Service::list(&pool).await?;
        to_value(&services)
    })
    .await?;
    Ok(ApiResponse::success(data))
}

/// GET /api/content/services/:id
pub async fn service_get(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let path = routes::service_detail(&id.to_string());
    let data = cached_route(&path, move || async move {
        let pool = Store::pool().await?;
        let service = Service::find_by_id_404(&pool, id).await?;
        to_value(&service)
    })
    .await?;
    Ok(ApiResponse::success(data))
}

/// GET /api/content/team - rendered on the about page
pub async fn team_get() -> ApiResult<Value> {
    let data = cached_route(routes::ABOUT, || async {
        let pool = Store::pool().await?;
        let members = TeamMember::list(&pool).await?;
        to_value(&members)
    })
    .await?;
    Ok(ApiResponse::success(data))
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

/// GET /api/content/gallery - ordered by explicit sort key
pub async fn gallery_get(Query(query): Query<GalleryQuery>) -> ApiResult<Value> {
    let category = query.category;
    let unfiltered = category.is_none();

    let render = move || async move {
        let pool = Store::pool().await?;
        let items = GalleryItem::list(&pool, category.as_deref()).await?;
        to_value(&items)
    };

    let data = if unfiltered {
        cached_route(routes::GALLERY, render).await?
    } else {
        render().await?
    };
    Ok(ApiResponse::success(data))
}

/// GET /api/content/blog - published posts, newest first
pub async fn blog_get() -> ApiResult<Value> {
    let data = cached_route(routes::BLOG, || async {
        let pool = Store::pool().await?;
        let posts = BlogPost::list(&pool, Audience::Public).await?;
        to_value(&posts)
    })
    .await?;
    Ok(ApiResponse::success(data))
}

/// GET /api/content/blog/:id - published post detail
pub async fn blog_post_get(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let path = routes::blog_detail(&id.to_string());
    let data = cached_route(&path, move || async move {
        let pool = Store::pool().await?;
        let post = BlogPost::find_by_id_404(&pool, id).await?;
        if !post.published {
            return Err(ApiError::not_found("Blog post not found"));
        }
        to_value(&post)
    })
    .await?;
    Ok(ApiResponse::success(data))
}

/// GET /api/content/settings - site chrome for every public page
pub async fn settings_get() -> ApiResult<Value> {
    let pool = Store::pool().await?;
    let settings = SiteSettings::get(&pool).await?;
    Ok(ApiResponse::success(to_value(&settings)?))
}
