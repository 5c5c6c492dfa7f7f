//! Authoritative in-memory store of known songs.

use std::collections::BTreeMap;

use crate::model::{SharedSong, Song, SongKey, normalize};

/// Storage for the canonical song instances.
///
/// "Not found" is always an empty result, never an error.
pub trait SongRepository {
    /// Insert a song, replacing any song with the same key.
    fn add(&mut self, song: SharedSong);

    /// Remove the song with this key. Returns whether anything was removed.
    fn remove(&mut self, key: &SongKey) -> bool;

    /// Handles to every stored song, in repository order.
    fn all(&self) -> Vec<SharedSong>;

    /// First song whose title matches case-insensitively.
    fn find_by_title(&self, title: &str) -> Option<SharedSong>;

    /// Exact lookup by identity key.
    fn find(&self, key: &SongKey) -> Option<SharedSong>;

    /// Move a song stored under `old_key` to the key of its current data.
    ///
    /// Needed after editing a song's title or artist in place. Returns
    /// `false` when nothing is stored under `old_key`.
    fn rekey(&mut self, old_key: &SongKey) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wrap and insert a song, returning its handle.
    fn add_song(&mut self, song: Song) -> SharedSong {
        let shared = SharedSong::new(song);
        self.add(shared.clone());
        shared
    }
}

/// Map-backed repository ordered by [`SongKey`] (title, then artist).
#[derive(Debug, Default)]
pub struct InMemorySongRepository {
    songs: BTreeMap<SongKey, SharedSong>,
}

impl InMemorySongRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SongRepository for InMemorySongRepository {
    fn add(&mut self, song: SharedSong) {
        if let Some(previous) = self.songs.insert(song.key(), song) {
            tracing::debug!(target: "library::repository", song = %previous.read().standardized_name(), "Replaced existing song");
        }
    }

    fn remove(&mut self, key: &SongKey) -> bool {
        self.songs.remove(key).is_some()
    }

    fn all(&self) -> Vec<SharedSong> {
        self.songs.values().cloned().collect()
    }

    fn find_by_title(&self, title: &str) -> Option<SharedSong> {
        let title = normalize(title);
        // Empty artist sorts first, so the range starts at the first song with this title
        self.songs
            .range(SongKey::new(&title, "")..)
            .next()
            .filter(|(key, _)| key.title() == title)
            .map(|(_, song)| song.clone())
    }

    fn find(&self, key: &SongKey) -> Option<SharedSong> {
        self.songs.get(key).cloned()
    }

    fn rekey(&mut self, old_key: &SongKey) -> bool {
        match self.songs.remove(old_key) {
            Some(song) => {
                self.add(song);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.songs.len()
    }
}
