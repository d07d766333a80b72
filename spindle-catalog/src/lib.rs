//! spindle-catalog library - collection catalog service
//!
//! Owns the catalog database and exposes the item registry over HTTP:
//! `GET /api/items`, `POST /api/items`, `GET /api/items/:id`, `/health`.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/items", get(api::list_items).post(api::create_item))
        .route("/api/items/:id", get(api::get_item))
        .merge(api::health_routes())
        // Browser clients may be served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
