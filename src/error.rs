//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`ConfigError`], [`StorageError`],
//!   [`CatalogError`], [`LibraryError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use tuneshelf::error::{Result, ResultExt};
//!
//! fn open(path: &Path) -> Result<Vec<Playlist>> {
//!     storage::load(path, &mut repo).with_context("while opening the library")
//! }
//! ```

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::library::LibraryError;
use crate::storage::StorageError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Console I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Library file error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog lookup error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Song or playlist operation error
    #[error("{0}")]
    Library(#[from] LibraryError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// True if the error means catalog lookups cannot work at all this session.
    pub fn is_fatal_catalog_error(&self) -> bool {
        match self {
            Self::Catalog(e) | Self::Library(LibraryError::Catalog(e)) => e.is_fatal(),
            Self::Config(ConfigError::MissingCredential(_)) => true,
            Self::WithContext { source, .. } => source.is_fatal_catalog_error(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
