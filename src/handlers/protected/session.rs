use axum::extract::Extension;
use serde_json::{json, Value};

use crate::database::models::User;
use crate::database::Store;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami - current user with the role read fresh from the
/// database, which is what the client-side gate keys its decision on
pub async fn whoami(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Value> {
    let pool = Store::pool().await?;
    let user = User::find_active_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::forbidden("User account is not active"))?;

    let is_admin = user.is_admin();
    Ok(ApiResponse::success(json!({
        "user": user,
        "is_admin": is_admin,
    })))
}
