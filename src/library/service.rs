//! Library service - the single entry point for every user-facing operation.
//!
//! Owns the song repository and the playlist collection, and consults the
//! catalog when a new song is added:
//! 1. Reject songs that are already in the library (no catalog call)
//! 2. Search the catalog with `"{title} {artist}"`
//! 3. Let the caller pick one candidate
//! 4. Store the resolved song

use rand::seq::SliceRandom;

use super::chooser::CandidateChooser;
use super::repository::SongRepository;
use super::search::SearchFields;
use super::LibraryError;
use crate::catalog::{CatalogApi, CatalogTrack};
use crate::model::{Playlist, SharedSong, Song, SongKey, contains_ignore_case, eq_ignore_case};

/// Genre stored when the user leaves it blank.
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

/// Result of [`LibraryService::add_song`].
#[derive(Debug, Clone)]
pub enum AddSongOutcome {
    /// The resolved song was stored
    Added(SharedSong),
    /// The library already holds this song; nothing changed
    AlreadyExists(SharedSong),
    /// The catalog had no candidates
    NoResults,
    /// The user declined to pick a candidate
    Cancelled,
}

/// Field changes for [`LibraryService::update_song`]. `None` keeps the value.
#[derive(Debug, Clone, Default)]
pub struct SongEdit {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub link: Option<String>,
}

impl SongEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.genre.is_none() && self.link.is_none()
    }

    /// Write the set fields into `song`, trimmed like every other user input.
    fn apply(self, song: &mut Song) {
        let fields = [
            (self.title, &mut song.title),
            (self.artist, &mut song.artist),
            (self.genre, &mut song.genre),
            (self.link, &mut song.link),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value.trim().to_string();
            }
        }
    }
}

/// Songs, playlists and catalog-assisted song entry.
pub struct LibraryService<R, C> {
    repo: R,
    catalog: C,
    playlists: Vec<Playlist>,
}

impl<R, C> LibraryService<R, C>
where
    R: SongRepository,
    C: CatalogApi,
{
    pub fn new(repo: R, catalog: C) -> Self {
        Self {
            repo,
            catalog,
            playlists: Vec::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    // -------- Songs --------

    /// Resolve a song through the catalog and add it to the library.
    ///
    /// With a non-empty `artist`, the library is checked for that exact
    /// title and artist first; with an empty one, any song with the title
    /// counts. A hit returns [`AddSongOutcome::AlreadyExists`] without
    /// touching the catalog. A blank `genre` is stored as [`UNKNOWN_GENRE`].
    pub async fn add_song(
        &mut self,
        title: &str,
        artist: &str,
        genre: &str,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<AddSongOutcome, LibraryError> {
        let (title, artist) = (title.trim(), artist.trim());
        if title.is_empty() {
            return Err(LibraryError::InvalidName);
        }

        let existing = if artist.is_empty() {
            self.repo.find_by_title(title)
        } else {
            self.repo.find(&SongKey::new(title, artist))
        };
        if let Some(song) = existing {
            tracing::info!(target: "library::service", song = %song.read().standardized_name(), "Song already in library");
            return Ok(AddSongOutcome::AlreadyExists(song));
        }

        let query = format!("{} {}", title, artist);
        let candidates = self.catalog.search(query.trim()).await.map_err(|e| {
            tracing::warn!(target: "library::service", query = %query.trim(), error = %e, "Catalog search failed");
            LibraryError::Catalog(e)
        })?;

        if candidates.is_empty() {
            tracing::info!(target: "library::service", query = %query.trim(), "No catalog results");
            return Ok(AddSongOutcome::NoResults);
        }

        let labels: Vec<String> = candidates.iter().map(CatalogTrack::label).collect();
        let Some(choice) = chooser.choose(&labels) else {
            return Ok(AddSongOutcome::Cancelled);
        };
        let candidate = choice
            .checked_sub(1)
            .and_then(|index| candidates.get(index))
            .ok_or(LibraryError::InvalidSelection {
                choice,
                count: candidates.len(),
            })?;

        let genre = match genre.trim() {
            "" => UNKNOWN_GENRE,
            genre => genre,
        };
        let label = candidate.label();
        let song = Song::from_standardized_name(&label, genre, candidate.url.as_str())
            .ok_or_else(|| LibraryError::MalformedCandidate(label.clone()))?;

        if let Some(existing) = self.repo.find(&song.key()) {
            tracing::info!(target: "library::service", song = %label, "Resolved song already in library");
            return Ok(AddSongOutcome::AlreadyExists(existing));
        }

        let shared = self.repo.add_song(song);
        tracing::info!(target: "library::service", song = %label, "Added song");
        Ok(AddSongOutcome::Added(shared))
    }

    /// Every song in the library, in repository order.
    pub fn all_songs(&self) -> Vec<SharedSong> {
        self.repo.all()
    }

    /// Remove the first song with this title, and every playlist entry for it.
    pub fn remove_song(&mut self, title: &str) -> bool {
        match self.repo.find_by_title(title) {
            Some(song) => self.remove_key(&song.key()),
            None => false,
        }
    }

    /// Remove the song with this exact title and artist, cascading to playlists.
    pub fn remove_song_by(&mut self, title: &str, artist: &str) -> bool {
        self.remove_key(&SongKey::new(title, artist))
    }

    fn remove_key(&mut self, key: &SongKey) -> bool {
        if !self.repo.remove(key) {
            return false;
        }

        let detached: usize = self
            .playlists
            .iter_mut()
            .map(|playlist| playlist.remove_all(key))
            .sum();
        tracing::info!(target: "library::service", title = key.title(), artist = key.artist(), playlist_entries = detached, "Removed song");
        true
    }

    /// Case-insensitive lookup by `"Artist - Title"`.
    pub fn find_song_by_standardized_name(&self, name: &str) -> Option<SharedSong> {
        let name = name.trim();
        self.repo
            .all()
            .into_iter()
            .find(|song| eq_ignore_case(&song.read().standardized_name(), name))
    }

    /// Edit a song in place.
    ///
    /// Playlists see the change immediately because they share the handle.
    /// Returns `Ok(None)` when no song matches, and an error when the new
    /// title/artist would collide with a different song.
    pub fn update_song(
        &mut self,
        title: &str,
        artist: &str,
        edit: SongEdit,
    ) -> Result<Option<SharedSong>, LibraryError> {
        let old_key = SongKey::new(title, artist);
        let Some(song) = self.repo.find(&old_key) else {
            return Ok(None);
        };

        let mut updated = song.snapshot();
        edit.apply(&mut updated);
        if updated.title.trim().is_empty() {
            return Err(LibraryError::InvalidName);
        }

        let new_key = updated.key();
        if new_key != old_key && self.repo.find(&new_key).is_some() {
            return Err(LibraryError::SongExists(updated.standardized_name()));
        }

        song.update(|s| *s = updated);
        if new_key != old_key {
            self.repo.rekey(&old_key);
        }

        tracing::info!(target: "library::service", song = %song.read().standardized_name(), "Updated song");
        Ok(Some(song))
    }

    /// Songs whose title contains `query`, case-insensitively.
    pub fn search_songs(&self, query: &str) -> Vec<SharedSong> {
        self.search_songs_in(query, SearchFields::TITLE)
    }

    /// Songs where any of `fields` contains `query`, case-insensitively.
    pub fn search_songs_in(&self, query: &str, fields: SearchFields) -> Vec<SharedSong> {
        self.repo
            .all()
            .into_iter()
            .filter(|song| fields.matches(&song.read(), query))
            .collect()
    }

    /// Every song in a fresh random order.
    pub fn shuffled_songs(&self) -> Vec<SharedSong> {
        let mut songs = self.repo.all();
        songs.shuffle(&mut rand::rng());
        songs
    }

    // -------- Playlists --------

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Replace the playlist collection (e.g. after loading from disk).
    pub fn set_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
    }

    /// Create an empty playlist.
    ///
    /// Names are unique regardless of case.
    pub fn create_playlist(&mut self, name: &str) -> Result<(), LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::InvalidName);
        }
        if self.find_playlist(name).is_some() {
            return Err(LibraryError::PlaylistExists(name.to_string()));
        }

        self.playlists.push(Playlist::new(name));
        tracing::info!(target: "library::service", playlist = name, "Created playlist");
        Ok(())
    }

    /// Case-insensitive playlist lookup.
    pub fn find_playlist(&self, name: &str) -> Option<&Playlist> {
        let name = name.trim();
        self.playlists.iter().find(|p| p.name_matches(name))
    }

    fn find_playlist_mut(&mut self, name: &str) -> Option<&mut Playlist> {
        let name = name.trim();
        self.playlists.iter_mut().find(|p| p.name_matches(name))
    }

    /// Append a library song (by `"Artist - Title"`) to a playlist.
    pub fn add_song_to_playlist(&mut self, playlist_name: &str, song_name: &str) -> bool {
        let Some(song) = self.find_song_by_standardized_name(song_name) else {
            return false;
        };
        match self.find_playlist_mut(playlist_name) {
            Some(playlist) => {
                playlist.add_song(song);
                true
            }
            None => false,
        }
    }

    /// Remove the first occurrence of a song (by `"Artist - Title"`) from a playlist.
    pub fn remove_song_from_playlist(&mut self, playlist_name: &str, song_name: &str) -> bool {
        let Some(song) = self.find_song_by_standardized_name(song_name) else {
            return false;
        };
        let key = song.key();
        self.find_playlist_mut(playlist_name)
            .is_some_and(|playlist| playlist.remove_song(&key))
    }

    /// Songs of a playlist in order; empty if the playlist doesn't exist.
    pub fn view_songs_in_playlist(&self, playlist_name: &str) -> Vec<SharedSong> {
        self.find_playlist(playlist_name)
            .map(|p| p.songs().to_vec())
            .unwrap_or_default()
    }

    /// Delete every playlist with this name (case-insensitive).
    pub fn delete_playlist(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.playlists.len();
        self.playlists.retain(|p| !p.name_matches(name));
        let removed = before - self.playlists.len();
        if removed > 0 {
            tracing::info!(target: "library::service", playlist = name, "Deleted playlist");
        }
        removed > 0
    }

    /// Playlists whose name contains `query`, case-insensitively.
    pub fn search_playlists(&self, query: &str) -> Vec<&Playlist> {
        self.playlists
            .iter()
            .filter(|p| contains_ignore_case(p.name(), query))
            .collect()
    }
}
