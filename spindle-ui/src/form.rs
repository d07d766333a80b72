//! Item form controller
//!
//! State machine: Hidden ⇄ Visible. Hidden → Visible on explicit user
//! request; Visible → Hidden on cancel (draft kept) or on successful
//! submission (draft reset to defaults). The draft holds raw field
//! text so failed submissions preserve exactly what was entered.

use tracing::warn;

use spindle_common::model::{YEAR_MAX, YEAR_MIN};
use spindle_common::{MediaFormat, NewCollectionItem};

/// Form visibility state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormVisibility {
    #[default]
    Hidden,
    Visible,
}

/// Pending, not-yet-submitted item data
///
/// Year and purchase date stay as the raw submitted strings until
/// validation; the format comes from a fixed-choice selector and is
/// typed from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub artist: String,
    pub album_title: String,
    pub year_of_release: String,
    pub genre: String,
    pub purchase_date: String,
    pub format: MediaFormat,
    pub cover_image_url: String,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            artist: String::new(),
            album_title: String::new(),
            year_of_release: String::new(),
            genre: String::new(),
            purchase_date: String::new(),
            format: MediaFormat::Cd,
            cover_image_url: String::new(),
        }
    }
}

/// Outcome of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission is in flight; this one is ignored
    Busy,
    /// Validation failed; draft preserved, form stays visible
    Invalid,
    /// Validated payload ready to POST; `submitting` is now set
    Ready(NewCollectionItem),
}

/// The item form: visibility, draft, and in-flight flag
#[derive(Debug, Default)]
pub struct ItemForm {
    visibility: FormVisibility,
    draft: ItemDraft,
    submitting: bool,
}

impl ItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> FormVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == FormVisibility::Visible
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    /// Show the form ("Add New Item" button or empty-state call-to-action)
    pub fn open(&mut self) {
        self.visibility = FormVisibility::Visible;
    }

    /// Overwrite the draft without submitting (cancel keeps typed text)
    ///
    /// Ignored while a submission is in flight so the in-flight draft
    /// is not clobbered.
    pub fn update_draft(&mut self, fields: ItemDraft) {
        if self.submitting {
            return;
        }
        self.draft = fields;
    }

    /// Hide the form without touching the draft
    pub fn cancel(&mut self) {
        self.visibility = FormVisibility::Hidden;
    }

    /// Accept submitted fields and validate them
    ///
    /// The submitted fields overwrite the draft wholesale, so whatever
    /// was entered survives a failure. While a submission is in flight
    /// new attempts are ignored (the rendered submit button is disabled,
    /// this guards hand-crafted requests).
    pub fn begin_submit(&mut self, fields: ItemDraft) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Busy;
        }

        self.draft = fields;

        match validate(&self.draft) {
            Ok(item) => {
                self.submitting = true;
                SubmitOutcome::Ready(item)
            }
            Err(reason) => {
                warn!("Rejected item submission: {}", reason);
                SubmitOutcome::Invalid
            }
        }
    }

    /// API accepted the item: reset the draft and hide the form
    pub fn finish_submit_success(&mut self) {
        self.submitting = false;
        self.draft = ItemDraft::default();
        self.visibility = FormVisibility::Hidden;
    }

    /// API rejected the item (or transport failed): keep draft and
    /// visibility so the user can retry
    pub fn finish_submit_failure(&mut self) {
        self.submitting = false;
    }
}

/// Validate the draft and build the create payload
///
/// Required text fields must be non-blank; the year must parse and lie
/// in the accepted range; the purchase date must be an ISO date. An
/// empty cover URL is normalized to None.
fn validate(draft: &ItemDraft) -> Result<NewCollectionItem, String> {
    if draft.artist.trim().is_empty() {
        return Err("artist is required".to_string());
    }
    if draft.album_title.trim().is_empty() {
        return Err("album title is required".to_string());
    }
    if draft.genre.trim().is_empty() {
        return Err("genre is required".to_string());
    }

    let year: i32 = draft
        .year_of_release
        .trim()
        .parse()
        .map_err(|_| format!("year is not a number: {:?}", draft.year_of_release))?;
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(format!(
            "year {} outside {}..={}",
            year, YEAR_MIN, YEAR_MAX
        ));
    }

    let purchase_date = draft
        .purchase_date
        .trim()
        .parse()
        .map_err(|_| format!("purchase date is not an ISO date: {:?}", draft.purchase_date))?;

    let cover_image_url = if draft.cover_image_url.trim().is_empty() {
        None
    } else {
        Some(draft.cover_image_url.clone())
    };

    Ok(NewCollectionItem {
        artist: draft.artist.clone(),
        album_title: draft.album_title.clone(),
        year_of_release: year,
        genre: draft.genre.clone(),
        purchase_date,
        format: draft.format,
        cover_image_url,
    })
}
