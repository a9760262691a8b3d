use axum::extract::Query;
use serde::Deserialize;

use crate::activity::{feed, Activity};
use crate::middleware::{ApiResponse, ApiResult};

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// GET /api/admin/activity - recent content changes, newest first
pub async fn recent(Query(query): Query<ActivityQuery>) -> ApiResult<Vec<Activity>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let activities = feed().recent(limit).await;
    Ok(ApiResponse::success(activities))
}
