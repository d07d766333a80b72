//! Database access for spindle-catalog
//!
//! Items are stored in a single `items` table in the catalog SQLite
//! database. Dates are stored as ISO 8601 text: `purchase_date` as
//! `YYYY-MM-DD`, `created_at` as RFC 3339.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use std::path::Path;

use spindle_common::CollectionItem;

/// Initialize database connection pool
///
/// Connects to the catalog database, creating the file and the parent
/// directory if needed.
pub async fn init_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize catalog tables
///
/// Creates the items table if it doesn't exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            artist TEXT NOT NULL,
            album_title TEXT NOT NULL,
            year_of_release INTEGER NOT NULL,
            genre TEXT NOT NULL,
            purchase_date TEXT NOT NULL,
            format TEXT NOT NULL,
            cover_image_url TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (items)");

    Ok(())
}

type ItemRow = (
    String,         // id
    String,         // artist
    String,         // album_title
    i64,            // year_of_release
    String,         // genre
    String,         // purchase_date
    String,         // format
    Option<String>, // cover_image_url
    String,         // created_at
);

fn row_to_item(row: ItemRow) -> Result<CollectionItem> {
    let (id, artist, album_title, year, genre, purchase_date, format, cover_image_url, created_at) =
        row;

    let purchase_date = NaiveDate::parse_from_str(&purchase_date, "%Y-%m-%d")
        .with_context(|| format!("invalid purchase_date for item {}", id))?;
    let format = format
        .parse()
        .map_err(|e| anyhow!("invalid format for item {}: {}", id, e))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .with_context(|| format!("invalid created_at for item {}", id))?
        .with_timezone(&Utc);

    Ok(CollectionItem {
        id,
        artist,
        album_title,
        year_of_release: year as i32,
        genre,
        purchase_date,
        format,
        cover_image_url,
        created_at: Some(created_at),
    })
}

/// Insert a new item
///
/// All fields including `cover_image_url` are persisted as received.
pub async fn insert_item(pool: &SqlitePool, item: &CollectionItem) -> Result<()> {
    let created_at = item
        .created_at
        .ok_or_else(|| anyhow!("item {} has no created_at", item.id))?;

    sqlx::query(
        r#"
        INSERT INTO items
            (id, artist, album_title, year_of_release, genre,
             purchase_date, format, cover_image_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.id)
    .bind(&item.artist)
    .bind(&item.album_title)
    .bind(item.year_of_release as i64)
    .bind(&item.genre)
    .bind(item.purchase_date.to_string())
    .bind(item.format.label())
    .bind(&item.cover_image_url)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch all items in display order (artist, then genre, case-insensitive)
pub async fn list_items(pool: &SqlitePool) -> Result<Vec<CollectionItem>> {
    let rows: Vec<ItemRow> = sqlx::query_as(
        r#"
        SELECT id, artist, album_title, year_of_release, genre,
               purchase_date, format, cover_image_url, created_at
        FROM items
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut items = rows
        .into_iter()
        .map(row_to_item)
        .collect::<Result<Vec<_>>>()?;

    // Ordering lives in spindle-common so the UI sorts identically
    spindle_common::model::sort_for_display(&mut items);

    Ok(items)
}

/// Fetch a single item by id, or None if no such item exists
pub async fn get_item(pool: &SqlitePool, id: &str) -> Result<Option<CollectionItem>> {
    let row: Option<ItemRow> = sqlx::query_as(
        r#"
        SELECT id, artist, album_title, year_of_release, genre,
               purchase_date, format, cover_image_url, created_at
        FROM items
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(row_to_item).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_common::{MediaFormat, NewCollectionItem};

    async fn test_pool() -> SqlitePool {
        // Single connection so every query sees the same in-memory database
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_tables(&pool).await.unwrap();
        pool
    }

    fn item(id: &str, artist: &str, genre: &str, cover: Option<&str>) -> CollectionItem {
        NewCollectionItem {
            artist: artist.to_string(),
            album_title: "Test Album".to_string(),
            year_of_release: 1984,
            genre: genre.to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            format: MediaFormat::Cd,
            cover_image_url: cover.map(String::from),
        }
        .into_item(id.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_all_fields() {
        let pool = test_pool().await;
        let original = item("id-1", "Kraftwerk", "Electronic", Some("http://example.com/c.jpg"));

        insert_item(&pool, &original).await.unwrap();
        let fetched = get_item(&pool, "id-1").await.unwrap().unwrap();

        assert_eq!(fetched.id, original.id);
        assert_eq!(fetched.artist, "Kraftwerk");
        assert_eq!(fetched.year_of_release, 1984);
        assert_eq!(fetched.purchase_date, original.purchase_date);
        assert_eq!(fetched.format, MediaFormat::Cd);
        // Cover URL survives the insert
        assert_eq!(
            fetched.cover_image_url.as_deref(),
            Some("http://example.com/c.jpg")
        );
        assert!(fetched.created_at.is_some());
    }

    #[tokio::test]
    async fn get_missing_item_returns_none() {
        let pool = test_pool().await;
        assert!(get_item(&pool, "no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_items_in_display_order() {
        let pool = test_pool().await;
        insert_item(&pool, &item("1", "Zappa", "Rock", None)).await.unwrap();
        insert_item(&pool, &item("2", "abba", "Pop", None)).await.unwrap();
        insert_item(&pool, &item("3", "ABBA", "Disco", None)).await.unwrap();

        let items = list_items(&pool).await.unwrap();
        let order: Vec<&str> = items.iter().map(|i| i.artist.as_str()).collect();
        // Case-insensitive artist ordering, genre tiebreak within "abba"/"ABBA"
        assert_eq!(order, ["ABBA", "abba", "Zappa"]);
    }

    #[tokio::test]
    async fn null_cover_round_trips_as_none() {
        let pool = test_pool().await;
        insert_item(&pool, &item("1", "Eno", "Ambient", None)).await.unwrap();

        let fetched = get_item(&pool, "1").await.unwrap().unwrap();
        assert!(fetched.cover_image_url.is_none());
    }
}
