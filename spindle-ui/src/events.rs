//! UI event bus
//!
//! Local event distribution for spindle-ui, backed by a tokio broadcast
//! channel. Events are serialized for SSE transmission to open pages,
//! which reload on receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events emitted by the UI service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// An item was appended to the collection store
    CollectionChanged {
        /// When the store changed
        timestamp: DateTime<Utc>,
    },

    /// A cover image probe resolved to Failed
    ///
    /// Only failures are announced: a successful probe does not change
    /// the rendered page (the image element is already shown).
    CoverFailed {
        /// Item whose cover failed to load
        item_id: String,
        /// When the probe resolved
        timestamp: DateTime<Utc>,
    },
}

impl UiEvent {
    /// SSE event name for this variant
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::CollectionChanged { .. } => "CollectionChanged",
            UiEvent::CoverFailed { .. } => "CoverFailed",
        }
    }
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// All UI events are non-critical: an open page merely misses a
    /// reload trigger if nobody is connected.
    pub fn emit_lossy(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
