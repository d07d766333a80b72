//! spindle-catalog - Collection catalog service
//!
//! Owns the catalog database (spindle.db) and exposes the item registry
//! over HTTP on port 5721. Zero-config startup: the root folder resolves
//! from SPINDLE_ROOT, then the TOML config file, then the platform
//! default, and the database file is created on first run.

use anyhow::Result;
use spindle_catalog::{build_router, AppState};
use spindle_common::config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Spindle Catalog (spindle-catalog) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Zero-config startup: env var, TOML file, then platform default
    let root_folder = config::resolve_root_folder();
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match spindle_catalog::db::init_pool(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    // Create application state and router
    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config::CATALOG_PORT);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("spindle-catalog listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
