//! Item submission route

use axum::{extract::State, response::Redirect, Form};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, error, info};

use spindle_common::MediaFormat;

use crate::events::UiEvent;
use crate::form::{ItemDraft, SubmitOutcome};
use crate::AppState;

/// Raw form submission body
///
/// Year and date arrive as text and are validated by the form
/// controller; the format comes from the fixed-choice selector.
#[derive(Debug, Deserialize)]
pub struct ItemFormBody {
    pub artist: String,
    pub album_title: String,
    pub year_of_release: String,
    pub genre: String,
    pub purchase_date: String,
    pub format: MediaFormat,
    #[serde(default)]
    pub cover_image_url: String,
}

impl ItemFormBody {
    pub fn into_draft(self) -> ItemDraft {
        ItemDraft {
            artist: self.artist,
            album_title: self.album_title,
            year_of_release: self.year_of_release,
            genre: self.genre,
            purchase_date: self.purchase_date,
            format: self.format,
            cover_image_url: self.cover_image_url,
        }
    }
}

/// POST /items
///
/// Runs the submission path: accept fields into the draft, validate,
/// POST to the catalog, and on success append the canonical record to
/// the store. Every outcome redirects back to `/`; failures are logged
/// and otherwise silent (the form keeps the draft and stays open).
pub async fn submit_item(
    State(state): State<AppState>,
    Form(body): Form<ItemFormBody>,
) -> Redirect {
    // Validate under the form lock, then release it before the network
    // call so the page stays responsive while the create is in flight
    let outcome = {
        let mut form = state.form.write().await;
        form.begin_submit(body.into_draft())
    };

    match outcome {
        SubmitOutcome::Busy => {
            debug!("Ignoring item submission while another is in flight");
        }
        SubmitOutcome::Invalid => {
            // Rejection already logged by the form controller
        }
        SubmitOutcome::Ready(new_item) => match state.client.create_item(&new_item).await {
            Ok(item) => {
                {
                    let mut form = state.form.write().await;
                    form.finish_submit_success();
                }
                {
                    let mut covers = state.covers.write().await;
                    covers.begin(&item);
                }
                state.spawn_cover_probe(&item);
                {
                    let mut store = state.store.write().await;
                    store.append(item.clone());
                }
                state.events.emit_lossy(UiEvent::CollectionChanged {
                    timestamp: Utc::now(),
                });
                info!(
                    "Added item {} ({} - {}) to the collection",
                    item.id, item.artist, item.album_title
                );
            }
            Err(e) => {
                error!("Failed to register item with catalog: {}", e);
                let mut form = state.form.write().await;
                form.finish_submit_failure();
            }
        },
    }

    Redirect::to("/")
}
