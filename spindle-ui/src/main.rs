//! spindle-ui - Collection UI service
//!
//! Serves the collection pages on port 5720 and talks to the catalog
//! service configured via SPINDLE_CATALOG_URL (default local catalog
//! on port 5721). Zero-config startup, no persisted local state.

use anyhow::Result;
use spindle_common::config;
use spindle_ui::{build_router, initial_load, AppState, CatalogClient};
use tracing::info;

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
        "Starting Spindle UI (spindle-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let client = CatalogClient::from_env();
    info!("Catalog base URL: {}", client.base_url());

    let state = AppState::new(client)?;

    // One-time collection load; a failed load starts with an empty store
    initial_load(&state).await;

    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config::UI_PORT);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("spindle-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
