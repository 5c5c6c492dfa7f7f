//! Core data models for the music library.
//!
//! Defines the primary entities: [`Song`] and [`Playlist`].
//!
//! # Identity
//!
//! Two songs are the same song when their [`SongKey`]s match, i.e. title and
//! artist are equal after trimming and lower-casing. The repository, playlist
//! removal and persistence reconciliation all compare songs this way.
//!
//! # Sharing
//!
//! The repository owns each song through a [`SharedSong`] handle. Playlists
//! clone the handle rather than the song, so an edit made through the
//! repository shows up in every playlist that references it.

mod playlist;
mod song;

pub use playlist::Playlist;
pub use song::{SharedSong, Song, SongKey, STANDARDIZED_NAME_DELIMITER};

/// Normalize a string for case-insensitive comparison.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive equality (Unicode-aware, unlike `eq_ignore_ascii_case`).
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
