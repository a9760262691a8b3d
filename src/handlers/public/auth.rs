use axum::{
    extract::Query,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::database::models::User;
use crate::database::Store;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - exchange credentials for a bearer token
pub async fn login_post(Json(payload): Json<LoginRequest>) -> ApiResult<Value> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let pool = Store::pool().await?;
    let user = User::find_by_email(&pool, payload.email.trim()).await?;

    // One generic message for unknown email, inactive account, and bad
    // password, so the endpoint doesn't confirm which emails exist.
    let user = user
        .filter(|user| user.active)
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    User::touch_last_login(&pool, user.id).await?;

    let claims = Claims::new(user.id, user.email.clone(), user.role.clone());
    let token = auth::generate_jwt(claims).map_err(|e| {
        tracing::error!("Failed to generate JWT: {}", e);
        ApiError::internal_server_error("Failed to establish session")
    })?;

    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user,
        "expires_in": expires_in,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LogoutQuery {
    pub redirect_to: Option<String>,
}

/// GET /auth/logout?redirect_to=<path> - clear session cookies and redirect
pub async fn logout_get(Query(query): Query<LogoutQuery>) -> Response {
    let target = sanitize_redirect(query.redirect_to.as_deref());

    let mut response = Redirect::to(&target).into_response();
    // Bearer clients just drop the token; browser sessions also carry it in
    // a cookie, which gets expired here.
    response.headers_mut().append(
        SET_COOKIE,
        axum::http::HeaderValue::from_static("atelier_token=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
    );
    response
}

/// Only local paths are valid redirect targets; anything else falls back to
/// the home page so the endpoint can't bounce users to foreign hosts.
fn sanitize_redirect(requested: Option<&str>) -> String {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_paths_pass_through() {
        assert_eq!(sanitize_redirect(Some("/admin/dashboard")), "/admin/dashboard");
        assert_eq!(sanitize_redirect(Some("/")), "/");
    }

    #[test]
    fn foreign_or_missing_targets_fall_back_to_home() {
        assert_eq!(sanitize_redirect(None), "/");
        assert_eq!(sanitize_redirect(Some("https://evil.example.com")), "/");
        assert_eq!(sanitize_redirect(Some("//evil.example.com")), "/");
        assert_eq!(sanitize_redirect(Some("relative/path")), "/");
    }
}
