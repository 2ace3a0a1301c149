//! `api` crate — HTTP REST API layer.
//!
//! Routes:
//!   POST   /auth/register
//!   POST   /auth/login
//!   POST   /auth/change-password
//!   GET    /users
//!   GET    /users/{id}
//!   PATCH  /users/{id}
//!   DELETE /users/{id}                       (ADMIN)
//!   POST   /reports
//!   GET    /reports
//!   GET    /reports/{id}
//!   PATCH  /reports/{id}/status
//!   PATCH  /reports/{id}/assign-department   (ADMIN)
//!   DELETE /reports/{id}                     (ADMIN)
//!   GET    /analytics/dashboard-stats
//!   GET    /analytics/heatmap

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use auth::TokenKeys;
use db::DbPool;
use lifecycle::ReportLifecycle;

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;

/// Report photos arrive as data URLs; match the original 50 MiB body cap.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub lifecycle: Arc<ReportLifecycle>,
    pub keys: TokenKeys,
}

impl AppState {
    pub fn new(pool: DbPool, lifecycle: Arc<ReportLifecycle>, keys: TokenKeys) -> Self {
        Self {
            pool,
            lifecycle,
            keys,
        }
    }
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/change-password", post(handlers::auth::change_password))
        .route("/users", get(handlers::users::list))
        .route(
            "/users/:id",
            get(handlers::users::get_one)
                .patch(handlers::users::update)
                .delete(handlers::users::remove),
        )
        .route(
            "/reports",
            post(handlers::reports::create).get(handlers::reports::list),
        )
        .route(
            "/reports/:id",
            get(handlers::reports::get_one).delete(handlers::reports::remove),
        )
        .route("/reports/:id/status", patch(handlers::reports::update_status))
        .route(
            "/reports/:id/assign-department",
            patch(handlers::reports::assign_department),
        )
        .route(
            "/analytics/dashboard-stats",
            get(handlers::analytics::dashboard_stats),
        )
        .route("/analytics/heatmap", get(handlers::analytics::heatmap))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and run the API server until shutdown.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("API server listening on {bind}");
    axum::serve(listener, build_router(state)).await
}
