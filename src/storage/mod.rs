//! Persistence of playlists to a flat JSON file.
//!
//! Saving writes the whole playlist collection; loading reads it back and
//! reconciles every song against the repository so that playlists share the
//! repository's canonical instances:
//! - a song the repository already knows is replaced by the repository's handle
//! - an unknown song is registered in the repository and kept
//!
//! Songs that are in the library but in no playlist are not written.

mod dto;

use std::path::{Path, PathBuf};

use crate::library::SongRepository;
use crate::model::{Playlist, Song};
use dto::StoredPlaylist;

/// Default library file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "music_library.json";

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to parse {0}: {1}")]
    Parse(PathBuf, serde_json::Error),

    #[error("Failed to serialize playlists: {0}")]
    Serialize(serde_json::Error),
}

/// Save all playlists, replacing the file's previous content.
///
/// Writes to a temp file first, then renames it over the target.
pub fn save(path: &Path, playlists: &[Playlist]) -> Result<(), StorageError> {
    let json = to_json(playlists)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| StorageError::Write(dir.to_path_buf(), e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json).map_err(|e| StorageError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path).map_err(|e| StorageError::Write(path.to_path_buf(), e))?;

    tracing::info!(target: "storage", path = %path.display(), playlists = playlists.len(), "Saved library");
    Ok(())
}

/// Load playlists, registering their songs in `repo`.
///
/// A missing file is an empty library, not an error.
pub fn load(path: &Path, repo: &mut impl SongRepository) -> Result<Vec<Playlist>, StorageError> {
    if !path.exists() {
        tracing::info!(target: "storage", path = %path.display(), "No library file, starting empty");
        return Ok(Vec::new());
    }

    let json =
        std::fs::read_to_string(path).map_err(|e| StorageError::Read(path.to_path_buf(), e))?;
    let stored: Vec<StoredPlaylist> =
        serde_json::from_str(&json).map_err(|e| StorageError::Parse(path.to_path_buf(), e))?;

    let playlists = reconcile(stored, repo);
    tracing::info!(target: "storage", path = %path.display(), playlists = playlists.len(), songs = repo.len(), "Loaded library");
    Ok(playlists)
}

/// Serialize playlists to the file format.
pub fn to_json(playlists: &[Playlist]) -> Result<String, StorageError> {
    let stored: Vec<StoredPlaylist> = playlists.iter().map(StoredPlaylist::from).collect();
    serde_json::to_string_pretty(&stored).map_err(StorageError::Serialize)
}

/// Rebuild playlists from stored data, sharing songs with the repository.
///
/// Names are trimmed like user input. Playlist names stay unique: a later
/// playlist whose name matches an earlier one (ignoring case) is dropped with
/// a warning, and so is one whose name is blank.
fn reconcile(stored: Vec<StoredPlaylist>, repo: &mut impl SongRepository) -> Vec<Playlist> {
    let mut playlists: Vec<Playlist> = Vec::with_capacity(stored.len());

    for entry in stored {
        let name = entry.name.trim();
        if name.is_empty() {
            tracing::warn!(target: "storage", "Skipping playlist with a blank name");
            continue;
        }
        if playlists.iter().any(|p| p.name_matches(name)) {
            tracing::warn!(target: "storage", playlist = %name, "Skipping duplicate playlist name");
            continue;
        }

        let mut playlist = Playlist::new(name);
        let songs = entry
            .songs
            .into_iter()
            .map(|stored| {
                let song = Song::from(stored);
                match repo.find(&song.key()) {
                    Some(canonical) => canonical,
                    None => repo.add_song(song),
                }
            })
            .collect();
        playlist.set_songs(songs);
        playlists.push(playlist);
    }

    playlists
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::InMemorySongRepository;
    use crate::test_utils::sample_song;

    fn playlist_with(name: &str, songs: &[crate::model::SharedSong]) -> Playlist {
        let mut playlist = Playlist::new(name);
        for song in songs {
            playlist.add_song(song.clone());
        }
        playlist
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = InMemorySongRepository::new();

        let playlists = load(&dir.path().join("nope.json"), &mut repo).unwrap();
        assert!(playlists.is_empty());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_reload_reuses_repository_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");

        let mut repo = InMemorySongRepository::new();
        let queen = repo.add_song(sample_song("Bohemian Rhapsody", "Queen"));
        let lennon = repo.add_song(sample_song("Imagine", "John Lennon"));
        save(
            &path,
            &[
                playlist_with("Road Trip", &[queen.clone(), lennon.clone(), queen.clone()]),
                playlist_with("Empty", &[]),
            ],
        )
        .unwrap();

        let loaded = load(&path, &mut repo).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name(), "Road Trip");
        let songs = loaded[0].songs();
        assert_eq!(songs.len(), 3);
        assert!(songs[0].ptr_eq(&queen));
        assert!(songs[1].ptr_eq(&lennon));
        assert!(songs[2].ptr_eq(&queen));
        assert!(loaded[1].is_empty());
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_load_registers_unknown_songs_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "A", "songs": [{"title": "Song", "artist": "X", "genre": "Pop", "spotifyUrl": "u"}]},
                {"name": "B", "songs": [{"title": "SONG", "artist": "x", "genre": "Other", "spotifyUrl": "v"}]}
            ]"#,
        )
        .unwrap();

        let mut repo = InMemorySongRepository::new();
        let loaded = load(&path, &mut repo).unwrap();

        assert_eq!(repo.len(), 1);
        let first = &loaded[0].songs()[0];
        let second = &loaded[1].songs()[0];
        assert!(first.ptr_eq(second));
        // First occurrence wins
        assert_eq!(first.read().genre, "Pop");
        assert!(repo.find_by_title("song").unwrap().ptr_eq(first));
    }

    #[test]
    fn test_load_drops_duplicate_playlist_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"[{"name": "Mix"}, {"name": "MIX"}, {"name": "Other"}]"#).unwrap();

        let mut repo = InMemorySongRepository::new();
        let names: Vec<_> = load(&path, &mut repo)
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Mix", "Other"]);
    }

    #[test]
    fn test_load_trims_playlist_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"[{"name": " Mix "}, {"name": "mix"}, {"name": "  "}]"#).unwrap();

        let mut repo = InMemorySongRepository::new();
        let loaded = load(&path, &mut repo).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name(), "Mix");

        let mut service =
            crate::library::LibraryService::new(repo, crate::catalog::OfflineCatalog);
        service.set_playlists(loaded);
        assert!(service.find_playlist("mix").is_some());
        assert!(service.find_playlist(" MIX ").is_some());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        let mut repo = InMemorySongRepository::new();
        assert!(matches!(load(&path, &mut repo), Err(StorageError::Parse(_, _))));
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");

        save(&path, &[Playlist::new("First"), Playlist::new("Second")]).unwrap();
        save(&path, &[Playlist::new("Only")]).unwrap();

        let mut repo = InMemorySongRepository::new();
        let loaded = load(&path, &mut repo).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name(), "Only");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_to_json_inlines_songs() {
        let song = crate::model::SharedSong::new(sample_song("Imagine", "John Lennon"));
        let json = to_json(&[playlist_with("Classics", &[song])]).unwrap();

        assert!(json.contains(r#""name": "Classics""#));
        assert!(json.contains(r#""title": "Imagine""#));
        assert!(json.contains(r#""artist": "John Lennon""#));
    }
}
