use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod activity;
mod admin;
mod auth;
mod cache;
mod config;
mod database;
mod error;
mod handlers;
mod media;
mod middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting Atelier API in {:?} mode", config.environment);

    // Best effort at boot; /health keeps reporting degraded until the
    // database comes up and the first request connects.
    if let Err(e) = database::Store::run_migrations().await {
        tracing::warn!("Could not apply migrations at startup: {}", e);
    }

    activity::feed().attach(Box::new(activity::LogObserver)).await;

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("ATELIER_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Atelier API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public content reads + contact form + token acquisition
        .merge(content_routes())
        .merge(public_auth_routes())
        // Authenticated (any active user)
        .merge(session_routes())
        // Admin-only, role re-verified against the database per request
        .merge(admin_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http());

    if crate::config::config().security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn content_routes() -> Router {
    use handlers::public::content;

    Router::new()
        .route("/api/content/projects", get(content::projects_get))
        .route("/api/content/projects/:id", get(content::project_get))
        .route("/api/content/services", get(content::services_get))
        .route("/api/content/services/:id", get(content::service_get))
        .route("/api/content/team", get(content::team_get))
        .route("/api/content/gallery", get(content::gallery_get))
        .route("/api/content/blog", get(content::blog_get))
        .route("/api/content/blog/:id", get(content::blog_post_get))
        .route("/api/content/settings", get(content::settings_get))
}

fn public_auth_routes() -> Router {
    use axum::routing::post;
    use handlers::public::{auth, contact};

    Router::new()
        .route("/auth/login", post(auth::login_post))
        .route("/api/auth/logout", get(auth::logout_get))
        .route("/api/contact", post(contact::contact_post))
}

fn session_routes() -> Router {
    use handlers::protected::session;

    Router::new()
        .route("/api/auth/whoami", get(session::whoami))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

fn admin_routes() -> Router {
    use axum::routing::{delete, post};
    use handlers::protected::{activity, blog, contact, gallery, projects, services, settings, team, upload, users};

    Router::new()
        .route("/api/admin/team", get(team::list).post(team::create))
        .route(
            "/api/admin/team/:id",
            get(team::show).put(team::update).delete(team::destroy),
        )
        .route("/api/admin/services", get(services::list).post(services::create))
        .route(
            "/api/admin/services/:id",
            get(services::show).put(services::update).delete(services::destroy),
        )
        .route("/api/admin/projects", get(projects::list).post(projects::create))
        .route(
            "/api/admin/projects/:id",
            get(projects::show).put(projects::update).delete(projects::destroy),
        )
        .route("/api/admin/projects/:id/images", delete(projects::remove_image))
        .route("/api/admin/gallery", get(gallery::list).post(gallery::create))
        .route(
            "/api/admin/gallery/:id",
            get(gallery::show).put(gallery::update).delete(gallery::destroy),
        )
        .route("/api/admin/blog", get(blog::list).post(blog::create))
        .route(
            "/api/admin/blog/:id",
            get(blog::show).put(blog::update).delete(blog::destroy),
        )
        .route("/api/admin/contact-submissions", get(contact::list))
        .route("/api/admin/contact-submissions/:id", delete(contact::destroy))
        .route("/api/admin/settings", get(settings::show).put(settings::update))
        .route("/api/admin/users", get(users::list))
        .route("/api/admin/activity", get(activity::recent))
        .route("/api/admin/upload", post(upload::upload_post))
        // Inner layer: role re-check against the users table.
        // Outer layer: bearer token validation. Added last runs first.
        .route_layer(axum::middleware::from_fn(middleware::require_admin_middleware))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Atelier API",
            "version": version,
            "description": "Content management API for an architecture studio website",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "content": "/api/content/* (public - published content only)",
                "contact": "/api/contact (public - contact form)",
                "auth": "/auth/login, /api/auth/logout (public - session management)",
                "whoami": "/api/auth/whoami (authenticated)",
                "admin": "/api/admin/* (admin role, verified server-side)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::Store::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
