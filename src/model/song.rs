//! The song entity and its shared handle.

use parking_lot::{RwLock, RwLockReadGuard};
use std::fmt;
use std::sync::Arc;

use super::normalize;

/// Separator between artist and title in a standardized name.
pub const STANDARDIZED_NAME_DELIMITER: &str = " - ";

/// A track's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Song {
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Genre (may be empty)
    pub genre: String,
    /// External playback link (may be empty)
    pub link: String,
}

impl Song {
    /// Create a song from its parts.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            link: link.into(),
        }
    }

    /// Build a song from an `"Artist - Title"` label.
    ///
    /// The label is split on the first `" - "`; everything after it is the
    /// title, so titles that themselves contain the delimiter survive intact.
    /// Returns `None` when the label has no delimiter.
    pub fn from_standardized_name(
        label: &str,
        genre: impl Into<String>,
        link: impl Into<String>,
    ) -> Option<Self> {
        let (artist, title) = label.split_once(STANDARDIZED_NAME_DELIMITER)?;
        Some(Self::new(title, artist, genre, link))
    }

    /// Display name in the form `"Artist - Title"`.
    pub fn standardized_name(&self) -> String {
        format!("{}{}{}", self.artist, STANDARDIZED_NAME_DELIMITER, self.title)
    }

    /// Identity key for this song.
    pub fn key(&self) -> SongKey {
        SongKey::new(&self.title, &self.artist)
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.standardized_name())?;
        if !self.genre.is_empty() {
            write!(f, " [{}]", self.genre)?;
        }
        if !self.link.is_empty() {
            write!(f, " - Listen on Spotify: {}", self.link)?;
        }
        Ok(())
    }
}

/// Composite identity of a song: normalized title and artist.
///
/// Ordering is by title first, so iterating a map keyed by `SongKey`
/// yields songs alphabetically by title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongKey {
    title: String,
    artist: String,
}

impl SongKey {
    /// Build a key, normalizing both parts.
    pub fn new(title: &str, artist: &str) -> Self {
        Self {
            title: normalize(title),
            artist: normalize(artist),
        }
    }

    /// Normalized title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Normalized artist.
    pub fn artist(&self) -> &str {
        &self.artist
    }
}

/// Shared, mutable handle to a canonical [`Song`].
///
/// Cloning the handle does not clone the song. Use [`SharedSong::ptr_eq`]
/// to check whether two handles point at the same instance.
#[derive(Debug, Clone)]
pub struct SharedSong(Arc<RwLock<Song>>);

impl SharedSong {
    /// Wrap a song in a new handle.
    pub fn new(song: Song) -> Self {
        Self(Arc::new(RwLock::new(song)))
    }

    /// Borrow the song for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, Song> {
        self.0.read()
    }

    /// Copy of the current song data.
    pub fn snapshot(&self) -> Song {
        self.0.read().clone()
    }

    /// Mutate the song in place. Every holder of this handle sees the change.
    pub fn update(&self, edit: impl FnOnce(&mut Song)) {
        edit(&mut self.0.write());
    }

    /// Identity key of the current song data.
    pub fn key(&self) -> SongKey {
        self.0.read().key()
    }

    /// Whether both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &SharedSong) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for SharedSong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0.read(), f)
    }
}
