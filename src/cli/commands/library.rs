//! Read-only views over the library file.

use crate::catalog::OfflineCatalog;
use crate::config::Config;
use crate::library::SearchFields;
use crate::model::{Playlist, SharedSong};

use super::open_library;

/// List all songs in the library
pub fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let service = open_library(&config.library.data_file, OfflineCatalog)?;
    print_songs(&service.all_songs(), "The library is empty.");
    Ok(())
}

/// List playlists with song counts
pub fn cmd_playlists(config: &Config) -> anyhow::Result<()> {
    let service = open_library(&config.library.data_file, OfflineCatalog)?;
    if service.playlists().is_empty() {
        println!("No playlists.");
    }
    for playlist in service.playlists() {
        println!("{}", playlist_summary(playlist));
    }
    Ok(())
}

/// Search songs by title, or by every field with `all_fields`
pub fn cmd_search(config: &Config, query: &str, all_fields: bool) -> anyhow::Result<()> {
    let service = open_library(&config.library.data_file, OfflineCatalog)?;
    let fields = if all_fields {
        SearchFields::all()
    } else {
        SearchFields::TITLE
    };
    print_songs(&service.search_songs_in(query, fields), "No songs found.");
    Ok(())
}

/// Print all songs in random order
pub fn cmd_shuffle(config: &Config) -> anyhow::Result<()> {
    let service = open_library(&config.library.data_file, OfflineCatalog)?;
    print_songs(&service.shuffled_songs(), "The library is empty.");
    Ok(())
}

fn print_songs(songs: &[SharedSong], empty_message: &str) {
    if songs.is_empty() {
        println!("{}", empty_message);
    }
    for (i, song) in songs.iter().enumerate() {
        println!("{}. {}", i + 1, song);
    }
}

fn playlist_summary(playlist: &Playlist) -> String {
    match playlist.len() {
        1 => format!("{} (1 song)", playlist.name()),
        n => format!("{} ({} songs)", playlist.name(), n),
    }
}
