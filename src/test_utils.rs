//! Test utilities and fixtures for tuneshelf tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{library_with, pick};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let mut service = library_with(&[("Imagine", "John Lennon")]);
//!     service.add_song("Hello", "Adele", "", &mut pick(1)).await.unwrap();
//! }
//! ```

use crate::catalog::traits::mocks::MockCatalog;
use crate::library::{InMemorySongRepository, LibraryService, SongRepository};
use crate::model::Song;

/// A song with a placeholder genre and link derived from the title.
pub fn sample_song(title: &str, artist: &str) -> Song {
    Song::new(
        title,
        artist,
        "Test Genre",
        format!("https://open.spotify.com/track/{}", title.to_lowercase().replace(' ', "-")),
    )
}

/// A service whose repository already holds `songs` (title, artist).
///
/// The catalog returns no results; use
/// [`MockCatalog::with_tracks`] directly when a test needs candidates.
pub fn library_with(songs: &[(&str, &str)]) -> LibraryService<InMemorySongRepository, MockCatalog> {
    let mut repo = InMemorySongRepository::new();
    for (title, artist) in songs {
        repo.add_song(sample_song(title, artist));
    }
    LibraryService::new(repo, MockCatalog::no_results())
}

/// A chooser that always picks the 1-based `choice`.
pub fn pick(choice: usize) -> impl FnMut(&[String]) -> Option<usize> {
    move |_candidates: &[String]| Some(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::CandidateChooser;

    #[test]
    fn test_library_with_registers_songs() {
        let service = library_with(&[("Imagine", "John Lennon"), ("Hello", "Adele")]);
        assert_eq!(service.all_songs().len(), 2);
    }

    #[test]
    fn test_pick_ignores_candidates() {
        let mut chooser = pick(3);
        assert_eq!(chooser.choose(&[]), Some(3));
    }

    #[test]
    fn test_sample_song_link() {
        let song = sample_song("One More Time", "Daft Punk");
        assert_eq!(song.link, "https://open.spotify.com/track/one-more-time");
    }
}
