//! spindle-ui library - collection UI service
//!
//! The client side of Spindle: holds the collection store, the item
//! form controller, and the presentation layer, talks to the catalog
//! service over HTTP, and serves server-rendered pages. Browser-side
//! logic is limited to an SSE-driven page reload.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::RwLock;
use tracing::{error, info};

use spindle_common::CollectionItem;

pub mod api;
pub mod client;
pub mod covers;
pub mod events;
pub mod form;
pub mod render;
pub mod store;
pub mod view;

pub use client::{CatalogClient, CatalogError};

use covers::CoverTracker;
use events::EventBus;
use form::ItemForm;
use store::CollectionStore;

/// Timeout for cover image probes
///
/// Probes are internal requests, not user actions, so unlike catalog
/// calls they get a deadline.
pub const COVER_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Event bus capacity
const EVENT_BUS_CAPACITY: usize = 100;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The collection store (session-local authoritative copy)
    pub store: Arc<RwLock<CollectionStore>>,
    /// The item form controller
    pub form: Arc<RwLock<ItemForm>>,
    /// Cover load states, keyed by item id
    pub covers: Arc<RwLock<CoverTracker>>,
    /// Catalog service client
    pub client: Arc<CatalogClient>,
    /// HTTP client for cover probes (short timeout)
    pub probe_http: reqwest::Client,
    /// UI event bus (drives SSE page reloads)
    pub events: EventBus,
}

impl AppState {
    pub fn new(client: CatalogClient) -> anyhow::Result<Self> {
        let probe_http = reqwest::Client::builder()
            .timeout(COVER_PROBE_TIMEOUT)
            .build()?;

        Ok(Self {
            store: Arc::new(RwLock::new(CollectionStore::new())),
            form: Arc::new(RwLock::new(ItemForm::new())),
            covers: Arc::new(RwLock::new(CoverTracker::new())),
            client: Arc::new(client),
            probe_http,
            events: EventBus::new(EVENT_BUS_CAPACITY),
        })
    }

    /// Start a background cover probe for an item (no-op without a URL)
    pub fn spawn_cover_probe(&self, item: &CollectionItem) {
        covers::spawn_probe(
            self.probe_http.clone(),
            self.covers.clone(),
            self.events.clone(),
            item,
        );
    }
}

/// One-time collection load at service startup
///
/// Fetches the full list from the catalog, then replaces the store
/// contents. A failed load leaves the store empty; the failure is
/// logged and otherwise silent. Covers of loaded items are registered
/// and probed in the background.
pub async fn initial_load(state: &AppState) {
    match state.client.list_items().await {
        Ok(items) => {
            info!("Loaded {} collection items from catalog", items.len());
            {
                let mut covers = state.covers.write().await;
                for item in &items {
                    covers.begin(item);
                }
            }
            for item in &items {
                state.spawn_cover_probe(item);
            }
            let mut store = state.store.write().await;
            store.replace_all(items);
        }
        Err(e) => {
            error!("Failed to load collection from catalog: {}", e);
            let mut store = state.store.write().await;
            store.clear();
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::index))
        .route("/form/open", post(api::open_form))
        .route("/form/cancel", post(api::cancel_form))
        .route("/items", post(api::submit_item))
        .route("/events", get(api::event_stream))
        .merge(api::health_routes())
        .with_state(state)
}
