//! Backing API client
//!
//! HTTP client for the catalog service (spindle-catalog or any service
//! honoring the same contract): list the collection, register an item.

use thiserror::Error;

use spindle_common::{CollectionItem, NewCollectionItem};

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Catalog service client
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the given base URL (trailing slashes stripped)
    ///
    /// No request timeout is configured: create requests wait as long as
    /// the catalog takes to answer.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from SPINDLE_CATALOG_URL (or the compiled default)
    pub fn from_env() -> Self {
        Self::new(spindle_common::config::resolve_catalog_url())
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET {base}/api/items
    pub async fn list_items(&self) -> Result<Vec<CollectionItem>, CatalogError> {
        let url = format!("{}/api/items", self.base_url);
        tracing::debug!(url = %url, "Fetching collection from catalog");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// POST {base}/api/items
    ///
    /// Returns the canonical record with the catalog-assigned id. Any
    /// non-2xx status is a failure; the body is not parsed further.
    pub async fn create_item(
        &self,
        item: &NewCollectionItem,
    ) -> Result<CollectionItem, CatalogError> {
        let url = format!("{}/api/items", self.base_url);
        tracing::debug!(url = %url, artist = %item.artist, "Registering item with catalog");

        let response = self
            .http_client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://127.0.0.1:5721/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5721");
    }

    #[test]
    fn base_url_without_slash_is_kept() {
        let client = CatalogClient::new("http://catalog.local:8080");
        assert_eq!(client.base_url(), "http://catalog.local:8080");
    }
}
