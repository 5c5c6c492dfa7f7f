//! Trait definition for the external catalog.
//!
//! The library service depends on [`CatalogApi`] rather than a concrete
//! client, so tests can substitute the mock below.

use async_trait::async_trait;

use super::domain::{CatalogError, CatalogTrack};

/// Free-text track search against an external catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Return candidate tracks for a query, best match first.
    ///
    /// An empty list means the catalog has no match; it is not an error.
    async fn search(&self, query: &str) -> Result<Vec<CatalogTrack>, CatalogError>;
}

#[async_trait]
impl CatalogApi for super::spotify::SpotifyClient {
    async fn search(&self, query: &str) -> Result<Vec<CatalogTrack>, CatalogError> {
        self.search(query).await
    }
}

/// Stand-in used by commands that never reach the catalog.
///
/// Every search fails with [`CatalogError::Configuration`].
pub struct OfflineCatalog;

#[async_trait]
impl CatalogApi for OfflineCatalog {
    async fn search(&self, _query: &str) -> Result<Vec<CatalogTrack>, CatalogError> {
        Err(CatalogError::Configuration(
            "catalog access is not available for this command".to_string(),
        ))
    }
}
