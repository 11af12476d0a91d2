//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // The data-entry page
        .route("/", get(handlers::index))
        // Scan and entry API
        .route("/api/scan", post(handlers::api_scan))
        .route(
            "/api/entries",
            get(handlers::api_entries).post(handlers::api_save),
        )
        .route("/api/export", get(handlers::api_export))
        .route("/api/status", get(handlers::api_status))
        // Static assets (CSS/JS)
        .route("/static/style.css", get(handlers::serve_css))
        .route("/static/app.js", get(handlers::serve_js))
        .layer(CorsLayer::permissive())
        // Phone photos of log sheets routinely exceed the 2 MB default.
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .with_state(state)
}
