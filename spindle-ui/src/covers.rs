//! Cover image load tracking
//!
//! Per-card cover fallback is declarative: a `CoverState` flag per item
//! decides whether the rendered card shows the image element or the
//! placeholder. States live outside the collection store, keyed by item
//! id. A background probe resolves Loading to Loaded or Failed; Loaded
//! and Failed are terminal, so a card can flip image to placeholder at
//! most once and never oscillates.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use spindle_common::CollectionItem;

use crate::events::{EventBus, UiEvent};

/// Load state of one item's cover image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverState {
    /// Probe outstanding; the image element is rendered
    Loading,
    /// Probe succeeded; terminal
    Loaded,
    /// Probe failed; terminal, the placeholder is rendered
    Failed,
}

/// Cover states for all items that have a cover URL
///
/// Items without a URL are never registered: no fetch is attempted
/// for them and the placeholder renders immediately.
#[derive(Debug, Default)]
pub struct CoverTracker {
    states: HashMap<String, CoverState>,
}

impl CoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item's cover as Loading
    ///
    /// No-op when the item has no cover URL or is already tracked.
    pub fn begin(&mut self, item: &CollectionItem) {
        if item.cover_image_url.is_none() {
            return;
        }
        self.states
            .entry(item.id.clone())
            .or_insert(CoverState::Loading);
    }

    pub fn get(&self, item_id: &str) -> Option<CoverState> {
        self.states.get(item_id).copied()
    }

    /// Apply a probe result
    ///
    /// Only a Loading entry transitions; returns whether a transition
    /// was applied. Terminal states are left untouched.
    pub fn resolve(&mut self, item_id: &str, loaded: bool) -> bool {
        match self.states.get_mut(item_id) {
            Some(state @ CoverState::Loading) => {
                *state = if loaded {
                    CoverState::Loaded
                } else {
                    CoverState::Failed
                };
                true
            }
            _ => false,
        }
    }
}

/// Probe a cover URL
///
/// True when the resource answers with a success status.
pub async fn probe(http: &reqwest::Client, url: &str) -> bool {
    match http.get(url).send().await {
        Ok(response) => {
            let ok = response.status().is_success();
            debug!(url = %url, status = %response.status(), "Cover probe resolved");
            ok
        }
        Err(e) => {
            debug!(url = %url, "Cover probe failed: {}", e);
            false
        }
    }
}

/// Spawn a background probe for an item's cover
///
/// Does nothing for items without a cover URL. A failed probe emits a
/// CoverFailed event so open pages re-render with the placeholder; a
/// successful probe changes nothing visible and stays silent.
pub fn spawn_probe(
    http: reqwest::Client,
    covers: Arc<RwLock<CoverTracker>>,
    events: EventBus,
    item: &CollectionItem,
) {
    let Some(url) = item.cover_image_url.clone() else {
        return;
    };
    let item_id = item.id.clone();

    tokio::spawn(async move {
        let loaded = probe(&http, &url).await;

        let transitioned = {
            let mut tracker = covers.write().await;
            tracker.resolve(&item_id, loaded)
        };

        if transitioned && !loaded {
            warn!(item_id = %item_id, url = %url, "Cover image unavailable, card falls back to placeholder");
            events.emit_lossy(UiEvent::CoverFailed {
                item_id,
                timestamp: Utc::now(),
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spindle_common::MediaFormat;

    fn item(id: &str, cover: Option<&str>) -> CollectionItem {
        CollectionItem {
            id: id.to_string(),
            artist: "Abba".to_string(),
            album_title: "Arrival".to_string(),
            year_of_release: 1976,
            genre: "Pop".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(1999, 1, 1).unwrap(),
            format: MediaFormat::Lp,
            cover_image_url: cover.map(String::from),
            created_at: None,
        }
    }

    #[test]
    fn item_without_url_is_never_tracked() {
        let mut tracker = CoverTracker::new();
        tracker.begin(&item("1", None));
        assert_eq!(tracker.get("1"), None);
    }

    #[test]
    fn item_with_url_starts_loading() {
        let mut tracker = CoverTracker::new();
        tracker.begin(&item("1", Some("http://example.com/c.jpg")));
        assert_eq!(tracker.get("1"), Some(CoverState::Loading));
    }

    #[test]
    fn resolve_applies_exactly_once() {
        let mut tracker = CoverTracker::new();
        tracker.begin(&item("1", Some("http://example.com/c.jpg")));

        assert!(tracker.resolve("1", false));
        assert_eq!(tracker.get("1"), Some(CoverState::Failed));

        // Terminal: a late success result cannot flip it back
        assert!(!tracker.resolve("1", true));
        assert_eq!(tracker.get("1"), Some(CoverState::Failed));
    }

    #[test]
    fn resolve_unknown_item_is_a_noop() {
        let mut tracker = CoverTracker::new();
        assert!(!tracker.resolve("ghost", true));
    }

    #[test]
    fn begin_does_not_reset_resolved_state() {
        let mut tracker = CoverTracker::new();
        let it = item("1", Some("http://example.com/c.jpg"));
        tracker.begin(&it);
        tracker.resolve("1", true);

        tracker.begin(&it);
        assert_eq!(tracker.get("1"), Some(CoverState::Loaded));
    }
}
