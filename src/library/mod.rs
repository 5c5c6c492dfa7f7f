//! Song repository, playlists and the service that coordinates them.
//!
//! - [`SongRepository`] / [`InMemorySongRepository`] - canonical song store
//! - [`LibraryService`] - every user-facing operation on songs and playlists
//! - [`CandidateChooser`] - how the caller picks a catalog candidate
//! - [`SearchFields`] - which song fields a search looks at

mod chooser;
mod repository;
mod search;
mod service;

pub use chooser::CandidateChooser;
pub use repository::{InMemorySongRepository, SongRepository};
pub use search::SearchFields;
pub use service::{AddSongOutcome, LibraryService, SongEdit, UNKNOWN_GENRE};

use crate::catalog::CatalogError;

/// Errors from library operations.
///
/// Missing songs and playlists are not errors; those operations return
/// `false`, `None` or an empty list instead.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Error fetching from catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Selection {choice} is out of range (1-{count})")]
    InvalidSelection { choice: usize, count: usize },

    /// Guards label parsing; labels built by `CatalogTrack::label` always
    /// contain `" - "`.
    #[error("Catalog result '{0}' is not in \"Artist - Title\" form")]
    MalformedCandidate(String),

    #[error("A playlist named '{0}' already exists")]
    PlaylistExists(String),

    #[error("Another song is already stored as '{0}'")]
    SongExists(String),

    #[error("Name must not be empty")]
    InvalidName,
}
