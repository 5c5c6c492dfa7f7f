//! Named, ordered collection of songs.

use super::{SharedSong, SongKey, eq_ignore_case};

/// A user-defined playlist.
///
/// Holds handles to songs owned by the repository; duplicates are allowed
/// and insertion order is preserved.
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    songs: Vec<SharedSong>,
}

impl Playlist {
    /// Create an empty playlist.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            songs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    pub fn songs(&self) -> &[SharedSong] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Append a song.
    pub fn add_song(&mut self, song: SharedSong) {
        self.songs.push(song);
    }

    /// Replace the song list.
    pub fn set_songs(&mut self, songs: Vec<SharedSong>) {
        self.songs = songs;
    }

    /// Remove the first occurrence of the song with this key.
    pub fn remove_song(&mut self, key: &SongKey) -> bool {
        match self.songs.iter().position(|s| &s.key() == key) {
            Some(index) => {
                self.songs.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every occurrence of the song with this key.
    ///
    /// Returns the number of entries removed.
    pub fn remove_all(&mut self, key: &SongKey) -> usize {
        let before = self.songs.len();
        self.songs.retain(|s| &s.key() != key);
        before - self.songs.len()
    }
}
