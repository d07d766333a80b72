//! Collection data model shared by the Spindle services
//!
//! Defines the catalog entity (`CollectionItem`), its creation payload
//! (`NewCollectionItem`), the physical media format enum, and the display
//! ordering used everywhere a list of items is shown.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Lowest release year accepted by the item form
pub const YEAR_MIN: i32 = 1900;

/// Highest release year accepted by the item form
pub const YEAR_MAX: i32 = 2030;

/// Physical media format of a collection item
///
/// Serialized as `"CD"` / `"LP"` on the wire. The fixed enum (rather than
/// free text) is what keeps display partitioning total: every item lands in
/// exactly one of the two format buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    /// Compact disc
    #[serde(rename = "CD")]
    Cd,
    /// Vinyl LP record
    #[serde(rename = "LP")]
    Lp,
}

impl MediaFormat {
    /// All formats, in display order (CD section first, then LP)
    pub const ALL: [MediaFormat; 2] = [MediaFormat::Cd, MediaFormat::Lp];

    /// Wire/display label ("CD" or "LP")
    pub fn label(&self) -> &'static str {
        match self {
            MediaFormat::Cd => "CD",
            MediaFormat::Lp => "LP",
        }
    }

    /// Section heading for this format's display bucket
    pub fn section_title(&self) -> &'static str {
        match self {
            MediaFormat::Cd => "CD Collection",
            MediaFormat::Lp => "LP Collection",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MediaFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CD" => Ok(MediaFormat::Cd),
            "LP" => Ok(MediaFormat::Lp),
            other => Err(Error::InvalidInput(format!("unknown media format: {other}"))),
        }
    }
}

/// A registered collection item
///
/// The canonical record as returned by the catalog service. `id` is assigned
/// by the catalog on creation and is opaque to clients; items are never
/// mutated or deleted once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Opaque unique identifier (UUID v4 text), catalog-assigned
    pub id: String,
    pub artist: String,
    pub album_title: String,
    pub year_of_release: i32,
    pub genre: String,
    /// Purchase date, `YYYY-MM-DD` on the wire
    pub purchase_date: NaiveDate,
    pub format: MediaFormat,
    /// Optional cover image URL; may reference an unreachable resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Creation timestamp stamped by the catalog; absent from backing APIs
    /// that do not report one. Never displayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Creation payload for a collection item
///
/// Same fields as [`CollectionItem`] minus the catalog-assigned `id` and
/// `created_at`. This is the `POST /api/items` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCollectionItem {
    pub artist: String,
    pub album_title: String,
    pub year_of_release: i32,
    pub genre: String,
    pub purchase_date: NaiveDate,
    pub format: MediaFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl NewCollectionItem {
    /// Promote to a canonical record with a catalog-assigned id and
    /// creation timestamp
    pub fn into_item(self, id: String, created_at: DateTime<Utc>) -> CollectionItem {
        CollectionItem {
            id,
            artist: self.artist,
            album_title: self.album_title,
            year_of_release: self.year_of_release,
            genre: self.genre,
            purchase_date: self.purchase_date,
            format: self.format,
            cover_image_url: self.cover_image_url,
            created_at: Some(created_at),
        }
    }
}

/// Display ordering: artist ascending, then genre ascending
///
/// Comparison is case-insensitive via Unicode lowercase folding, so "abba"
/// and "ABBA" compare as the same prefix rather than by raw byte order.
/// Ties beyond artist and genre are left to the (stable) sort.
pub fn display_order(a: &CollectionItem, b: &CollectionItem) -> Ordering {
    fold(&a.artist)
        .cmp(&fold(&b.artist))
        .then_with(|| fold(&a.genre).cmp(&fold(&b.genre)))
}

/// Sort a list of items into display order (stable)
pub fn sort_for_display(items: &mut [CollectionItem]) {
    items.sort_by(display_order);
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}
