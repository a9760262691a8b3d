use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use super::auth::AuthUser;
use crate::auth::gate::{self, GateCheck, GateOutcome};
use crate::database::models::User;
use crate::database::Store;
use crate::error::ApiError;

/// Admin identity confirmed against the users table, not just token claims
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub user: User,
}

/// Middleware that re-verifies the caller's admin role against the database.
///
/// Token claims only prove who signed in; the role and active flag are read
/// fresh on every privileged request so a demoted or deactivated account is
/// locked out immediately. Client-asserted role flags are never consulted.
pub async fn require_admin_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| {
            respond(ApiError::unauthorized("Authentication required before admin validation"))
        })?
        .clone();

    let pool = Store::pool().await.map_err(|e| {
        tracing::error!("Database unavailable during admin validation: {}", e);
        respond(ApiError::service_unavailable("Database temporarily unavailable"))
    })?;

    let user = User::find_active_by_id(&pool, auth_user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Database error validating admin '{}': {}", auth_user.email, e);
            respond(ApiError::internal_server_error("Failed to validate user"))
        })?;

    let user = user.ok_or_else(|| {
        tracing::warn!(
            "Admin validation failed: user '{}' ({}) not found or inactive",
            auth_user.email,
            auth_user.user_id
        );
        respond(ApiError::forbidden("User account is not active"))
    })?;

    // The token may predate an email or role change; the row wins.
    if user.email != auth_user.email {
        tracing::warn!(
            "Admin validation failed: token email '{}' does not match account '{}'",
            auth_user.email,
            user.email
        );
        return Err(respond(ApiError::forbidden("User authentication mismatch")));
    }

    // Same decision the UI gate makes, with the role taken from the row
    let check = GateCheck::Authenticated { is_admin: user.is_admin() };
    if gate::resolve(check, true) != GateOutcome::Render {
        tracing::warn!("Admin validation failed: user '{}' has role '{}'", user.email, user.role);
        return Err(respond(ApiError::forbidden("Admin role required")));
    }

    tracing::debug!("Admin validation successful: {} ({})", user.full_name, user.email);

    request.extensions_mut().insert(AdminUser { user });

    Ok(next.run(request).await)
}

fn respond(api_error: ApiError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::from_u16(api_error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(api_error.to_json()),
    )
}
