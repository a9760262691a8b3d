use crate::database::models::User;
use crate::database::Store;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/admin/users - password hashes are skipped at serialization
pub async fn list() -> ApiResult<Vec<User>> {
    let pool = Store::pool().await?;
    let users = User::list(&pool).await?;
    Ok(ApiResponse::success(users))
}
