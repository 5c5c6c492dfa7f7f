//! Music catalog lookups - resolves free-text queries to canonical tracks.
//!
//! # Architecture
//!
//! Same split as any external API integration here:
//! - **Domain models** (`domain.rs`) - `CatalogTrack`, `CatalogError`, tokens
//! - **API DTOs** (`spotify/dto.rs`) - Exact API response shapes
//! - **Adapter** (`spotify/adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`spotify/client.rs`, `spotify/auth.rs`) - HTTP + token cache
//! - **Trait** (`traits.rs`) - The seam the library service depends on
//!
//! # Usage
//!
//! ```ignore
//! let client = catalog::SpotifyClient::new(&config.catalog, credentials)?;
//! let candidates = client.search("one more time daft punk").await?;
//! for track in &candidates {
//!     println!("{} -> {}", track.label(), track.url);
//! }
//! ```

pub mod domain;
mod spotify;
pub mod traits;

pub use domain::{CatalogCredentials, CatalogError, CatalogTrack};
pub use spotify::SpotifyClient;
pub use traits::{CatalogApi, OfflineCatalog};
