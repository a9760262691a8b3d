use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::{page_cache, routes};
use crate::config;
use crate::database::models::{
    Project, UpdateBlogPost, UpdateGalleryItem, UpdateService, UpdateTeamMember,
};
use crate::database::models::{BlogPost, GalleryItem, Service, TeamMember};
use crate::database::Store;
use crate::error::ApiError;
use crate::media::MediaClient;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file: Option<String>,
    pub folder: Option<String>,
    pub record_type: Option<String>,
    pub record_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    #[serde(rename = "publicId")]
    pub public_id: String,
}

/// POST /api/admin/upload - forward an image to the hosting service and,
/// when a record is named, store the resulting URL on it.
///
/// The route sits behind the JWT and admin-revalidation layers, so no
/// upstream call can happen for an unauthenticated or non-admin caller.
pub async fn upload_post(Json(payload): Json<UploadRequest>) -> ApiResult<UploadResponse> {
    let file = payload
        .file
        .as_deref()
        .filter(|file| !file.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No file provided"))?;

    let folder = payload
        .folder
        .clone()
        .unwrap_or_else(|| config::config().media.default_folder.clone());

    let client = MediaClient::from_config()?;
    let uploaded = client.upload(file, &folder).await?;

    // The upload succeeded; only now may a record be touched. An upstream
    // failure above means no partial patch ever happens.
    if let (Some(record_type), Some(record_id)) = (payload.record_type.as_deref(), payload.record_id) {
        patch_record(record_type, record_id, &uploaded.url).await?;
    }

    Ok(ApiResponse::success(UploadResponse {
        url: uploaded.url,
        public_id: uploaded.public_id,
    }))
}

/// Store the uploaded URL on the named record: projects append to their
/// ordered image list, everything else replaces a single image field.
async fn patch_record(record_type: &str, record_id: Uuid, url: &str) -> Result<(), ApiError> {
    let pool = Store::pool().await?;

    match record_type {
        "project" => {
            Project::append_image(&pool, record_id, url).await?;
            page_cache()
                .invalidate_many(&[routes::PROJECTS, routes::ADMIN_PROJECTS])
                .await;
        }
        "team" => {
            let patch = UpdateTeamMember {
                image_url: Some(url.to_string()),
                ..Default::default()
            };
            TeamMember::update(&pool, record_id, &patch).await?;
            page_cache().invalidate_many(&[routes::ABOUT, routes::ADMIN_TEAM]).await;
        }
        "service" => {
            let patch = UpdateService {
                image_url: Some(url.to_string()),
                ..Default::default()
            };
            Service::update(&pool, record_id, &patch).await?;
            page_cache()
                .invalidate_many(&[routes::SERVICES, routes::ADMIN_SERVICES])
                .await;
            page_cache()
                .invalidate(&routes::service_detail(&record_id.to_string()))
                .await;
        }
        "gallery" => {
            let patch = UpdateGalleryItem {
                image_url: Some(url.to_string()),
                ..Default::default()
            };
            GalleryItem::update(&pool, record_id, &patch).await?;
            page_cache()
                .invalidate_many(&[routes::GALLERY, routes::ADMIN_GALLERY])
                .await;
        }
        "blog" => {
            let patch = UpdateBlogPost {
                featured_image: Some(url.to_string()),
                ..Default::default()
            };
            BlogPost::update(&pool, record_id, &patch).await?;
            page_cache().invalidate_many(&[routes::BLOG, routes::ADMIN_BLOG]).await;
            page_cache()
                .invalidate(&routes::blog_detail(&record_id.to_string()))
                .await;
        }
        other => {
            return Err(ApiError::bad_request(format!("Unknown record type: {}", other)));
        }
    }

    Ok(())
}
