//! Item registration and retrieval endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use spindle_common::{CollectionItem, NewCollectionItem};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/items
///
/// Returns all registered items in display order (artist ascending,
/// then genre ascending, case-insensitive).
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<CollectionItem>>> {
    let items = db::list_items(&state.db).await?;
    Ok(Json(items))
}

/// POST /api/items
///
/// Registers a new item. The catalog assigns the id and creation
/// timestamp and returns the complete record. Required text fields
/// must be non-blank; everything else is taken as submitted.
pub async fn create_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewCollectionItem>,
) -> ApiResult<Json<CollectionItem>> {
    if new_item.artist.trim().is_empty()
        || new_item.album_title.trim().is_empty()
        || new_item.genre.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "artist, album_title and genre are required".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let item = new_item.into_item(id, Utc::now());

    db::insert_item(&state.db, &item).await?;

    info!(
        "Registered item {} ({} - {}, {})",
        item.id, item.artist, item.album_title, item.format
    );

    Ok(Json(item))
}

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CollectionItem>> {
    match db::get_item(&state.db, &id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound(format!("Item not found: {}", id))),
    }
}
