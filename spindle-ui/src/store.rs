//! Collection store
//!
//! The in-memory authoritative copy of the item list for the current
//! session. Synchronized from the Backing API once at startup and
//! appended to on successful creation; items are never mutated or
//! deleted.

use spindle_common::model::sort_for_display;
use spindle_common::CollectionItem;

/// In-memory ordered collection of items
///
/// An explicitly owned object held in the service state behind a lock
/// and passed by handle; never ambient. The append path re-sorts with
/// the shared display comparator (artist ascending, then genre
/// ascending, case-insensitive); the initial load keeps the API
/// response order, which the catalog already sorts the same way.
#[derive(Debug, Default)]
pub struct CollectionStore {
    items: Vec<CollectionItem>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the entire list (initial load success path)
    pub fn replace_all(&mut self, items: Vec<CollectionItem>) {
        self.items = items;
    }

    /// Drop all items (initial load failure path)
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append an item and re-sort into display order
    ///
    /// `sort_by` is stable, so ties beyond artist and genre keep their
    /// existing relative order.
    pub fn append(&mut self, item: CollectionItem) {
        self.items.push(item);
        sort_for_display(&mut self.items);
    }

    pub fn items(&self) -> &[CollectionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spindle_common::MediaFormat;

    fn item(id: &str, artist: &str, genre: &str, format: MediaFormat) -> CollectionItem {
        CollectionItem {
            id: id.to_string(),
            artist: artist.to_string(),
            album_title: "Album".to_string(),
            year_of_release: 1990,
            genre: genre.to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            format,
            cover_image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn append_keeps_display_order() {
        let mut store = CollectionStore::new();
        store.append(item("1", "Queen", "Rock", MediaFormat::Cd));
        store.append(item("2", "Abba", "Pop", MediaFormat::Lp));
        store.append(item("3", "abba", "Disco", MediaFormat::Cd));

        let artists: Vec<&str> = store.items().iter().map(|i| i.artist.as_str()).collect();
        // "abba"/"Abba" equal on artist, Disco before Pop on genre
        assert_eq!(artists, ["abba", "Abba", "Queen"]);
    }

    #[test]
    fn append_grows_by_one() {
        let mut store = CollectionStore::new();
        assert!(store.is_empty());

        store.append(item("1", "Eno", "Ambient", MediaFormat::Cd));
        assert_eq!(store.len(), 1);

        store.append(item("2", "Can", "Krautrock", MediaFormat::Lp));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_all_takes_list_as_given() {
        let mut store = CollectionStore::new();
        store.append(item("0", "Zappa", "Rock", MediaFormat::Lp));

        // Replacement does not re-sort; the catalog response is already
        // in display order
        store.replace_all(vec![
            item("1", "Beta", "Pop", MediaFormat::Cd),
            item("2", "Alpha", "Pop", MediaFormat::Cd),
        ]);

        let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = CollectionStore::new();
        store.append(item("1", "Eno", "Ambient", MediaFormat::Cd));
        store.clear();
        assert!(store.is_empty());
    }
}
