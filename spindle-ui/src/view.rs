//! Presentation view model
//!
//! Partitions the collection store into the two format buckets and
//! decides per card whether the cover image or the placeholder shows.
//! Pure data; `render` turns it into HTML.

use spindle_common::{CollectionItem, MediaFormat};

use crate::covers::{CoverState, CoverTracker};

/// What the cover area of a card shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverView {
    Image { url: String },
    Placeholder,
}

/// One rendered card
#[derive(Debug, Clone)]
pub struct CardView {
    pub item: CollectionItem,
    pub cover: CoverView,
}

/// One format section (CD or LP)
#[derive(Debug, Clone)]
pub struct BucketView {
    pub format: MediaFormat,
    pub cards: Vec<CardView>,
}

impl BucketView {
    pub fn title(&self) -> &'static str {
        self.format.section_title()
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The whole collection area of the page
#[derive(Debug, Clone)]
pub enum CollectionView {
    /// Nothing registered yet: single call-to-action block
    Empty,
    /// Both sections, either of which may hold zero cards
    Sections { cd: BucketView, lp: BucketView },
}

/// Build the view model from the store contents and cover states
///
/// Partitioning is total and disjoint: every item lands in exactly one
/// bucket, in store order.
pub fn build_view(items: &[CollectionItem], covers: &CoverTracker) -> CollectionView {
    if items.is_empty() {
        return CollectionView::Empty;
    }

    let mut cd = BucketView {
        format: MediaFormat::Cd,
        cards: Vec::new(),
    };
    let mut lp = BucketView {
        format: MediaFormat::Lp,
        cards: Vec::new(),
    };

    for item in items {
        let card = CardView {
            item: item.clone(),
            cover: cover_view(item, covers),
        };
        match item.format {
            MediaFormat::Cd => cd.cards.push(card),
            MediaFormat::Lp => lp.cards.push(card),
        }
    }

    CollectionView::Sections { cd, lp }
}

fn cover_view(item: &CollectionItem, covers: &CoverTracker) -> CoverView {
    match &item.cover_image_url {
        // No URL: placeholder immediately, nothing is ever fetched
        None => CoverView::Placeholder,
        Some(url) => match covers.get(&item.id) {
            Some(CoverState::Failed) => CoverView::Placeholder,
            // Loading and Loaded both show the image element; an
            // untracked URL (not probed yet) behaves like Loading
            _ => CoverView::Image { url: url.clone() },
        },
    }
}
