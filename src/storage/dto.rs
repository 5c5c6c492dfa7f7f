//! On-disk shape of the library file.
//!
//! A JSON array of playlists, each with its songs fully inlined. The field
//! names match files written by earlier versions of the tool, so existing
//! libraries keep loading.

use serde::{Deserialize, Serialize};

use crate::model::{Playlist, Song};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredPlaylist {
    pub name: String,
    #[serde(default)]
    pub songs: Vec<StoredSong>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredSong {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, rename = "spotifyUrl", alias = "spotify_url")]
    pub link: String,
}

impl From<&Playlist> for StoredPlaylist {
    fn from(playlist: &Playlist) -> Self {
        Self {
            name: playlist.name().to_string(),
            songs: playlist
                .songs()
                .iter()
                .map(|song| StoredSong::from(&*song.read()))
                .collect(),
        }
    }
}

impl From<&Song> for StoredSong {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            genre: song.genre.clone(),
            link: song.link.clone(),
        }
    }
}

impl From<StoredSong> for Song {
    fn from(stored: StoredSong) -> Self {
        Song::new(stored.title, stored.artist, stored.genre, stored.link)
    }
}
