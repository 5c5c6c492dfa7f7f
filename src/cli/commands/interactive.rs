//! Interactive numbered menu over the library.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::{catalog_client, load_library};
use crate::catalog::CatalogApi;
use crate::cli::console::ConsolePrompt;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::library::{
    AddSongOutcome, InMemorySongRepository, LibraryService, SearchFields, SongEdit, SongRepository,
};
use crate::model::SharedSong;
use crate::storage;

/// Menu entries in display order.
const MENU: &[(MenuChoice, &str)] = &[
    (MenuChoice::AddSong, "Add song"),
    (MenuChoice::ListSongs, "List songs"),
    (MenuChoice::RemoveSong, "Remove song"),
    (MenuChoice::CreatePlaylist, "Create playlist"),
    (MenuChoice::AddToPlaylist, "Add song to playlist"),
    (MenuChoice::RemoveFromPlaylist, "Remove song from playlist"),
    (MenuChoice::ViewPlaylist, "View playlist"),
    (MenuChoice::DeletePlaylist, "Delete playlist"),
    (MenuChoice::SearchSongs, "Search songs"),
    (MenuChoice::SearchPlaylists, "Search playlists"),
    (MenuChoice::Shuffle, "Shuffle play"),
    (MenuChoice::EditSong, "Edit song"),
    (MenuChoice::Save, "Save library"),
    (MenuChoice::Exit, "Exit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddSong = 1,
    ListSongs = 2,
    RemoveSong = 3,
    CreatePlaylist = 4,
    AddToPlaylist = 5,
    RemoveFromPlaylist = 6,
    ViewPlaylist = 7,
    DeletePlaylist = 8,
    SearchSongs = 9,
    SearchPlaylists = 10,
    Shuffle = 11,
    EditSong = 12,
    Save = 13,
    Exit = 14,
}

impl MenuChoice {
    fn from_number(number: usize) -> Option<Self> {
        if number == 0 {
            return Some(Self::Exit);
        }
        MENU.iter()
            .map(|(choice, _)| *choice)
            .find(|choice| *choice as usize == number)
    }
}

/// Run the interactive menu until the user exits.
pub fn cmd_interactive(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let catalog = catalog_client(config)?;
    let data_file = config.library.data_file.clone();

    let (repo, playlists, loaded) = match load_library(&data_file) {
        Ok((repo, playlists)) => (repo, playlists, true),
        Err(e) => {
            warn!(target: "cli", error = %e, "Starting with an empty library");
            eprintln!("Warning: {e}");
            eprintln!(
                "Starting with an empty library; it will only be saved if you choose 'Save library'."
            );
            (InMemorySongRepository::new(), Vec::new(), false)
        }
    };

    let mut service = LibraryService::new(repo, catalog);
    service.set_playlists(playlists);

    let autosave = config.library.save_on_exit && loaded;
    let mut session = Session::new(service, ConsolePrompt::stdio(), data_file, autosave);
    rt.block_on(session.run())?;
    Ok(())
}

/// One interactive session: a library, a console, and where to save.
pub struct Session<R, C, I, O> {
    service: LibraryService<R, C>,
    prompt: ConsolePrompt<I, O>,
    data_file: PathBuf,
    autosave: bool,
}

impl<R, C, I, O> Session<R, C, I, O>
where
    R: SongRepository,
    C: CatalogApi,
    I: BufRead,
    O: Write,
{
    pub fn new(
        service: LibraryService<R, C>,
        prompt: ConsolePrompt<I, O>,
        data_file: PathBuf,
        autosave: bool,
    ) -> Self {
        Self {
            service,
            prompt,
            data_file,
            autosave,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (LibraryService<R, C>, ConsolePrompt<I, O>) {
        (self.service, self.prompt)
    }

    /// Show the menu and dispatch choices until exit or end of input.
    ///
    /// Saves on the way out when autosave is on.
    pub async fn run(&mut self) -> Result<()> {
        self.prompt.say("Welcome to your music library!")?;

        loop {
            self.show_menu()?;
            let choice = match self.prompt.read_number("Choose an option: ")? {
                None => break,
                Some(number) => match MenuChoice::from_number(number) {
                    Some(choice) => choice,
                    None => {
                        self.prompt.say("Invalid choice. Please try again.")?;
                        continue;
                    }
                },
            };

            if choice == MenuChoice::Exit {
                break;
            }
            self.dispatch(choice).await?;
        }

        if self.autosave {
            self.save()?;
        }
        self.prompt.say("Goodbye!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        self.prompt.say("")?;
        for (choice, label) in MENU {
            self.prompt.say(format_args!("{}. {}", *choice as usize, label))?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddSong => self.add_song().await,
            MenuChoice::ListSongs => self.list_songs(),
            MenuChoice::RemoveSong => self.remove_song(),
            MenuChoice::CreatePlaylist => self.create_playlist(),
            MenuChoice::AddToPlaylist => self.add_to_playlist(),
            MenuChoice::RemoveFromPlaylist => self.remove_from_playlist(),
            MenuChoice::ViewPlaylist => self.view_playlist(),
            MenuChoice::DeletePlaylist => self.delete_playlist(),
            MenuChoice::SearchSongs => self.search_songs(),
            MenuChoice::SearchPlaylists => self.search_playlists(),
            MenuChoice::Shuffle => self.shuffle(),
            MenuChoice::EditSong => self.edit_song(),
            MenuChoice::Save => self.save(),
            MenuChoice::Exit => Ok(()),
        }
    }

    async fn add_song(&mut self) -> Result<()> {
        let Some(title) = self.prompt.read_line("Enter song title: ")? else {
            return Ok(());
        };
        let Some(artist) = self.prompt.read_line("Enter artist: ")? else {
            return Ok(());
        };
        let Some(genre) = self.prompt.read_line("Enter genre (leave blank if unknown): ")? else {
            return Ok(());
        };

        match self.service.add_song(&title, &artist, &genre, &mut self.prompt).await {
            Ok(AddSongOutcome::Added(song)) => {
                self.prompt.say(format_args!("Song added: {}", song))?
            }
            Ok(AddSongOutcome::AlreadyExists(song)) => self.prompt.say(format_args!(
                "Song already exists in the library: {}",
                song.read().standardized_name()
            ))?,
            Ok(AddSongOutcome::NoResults) => self.prompt.say("No results found in the catalog.")?,
            Ok(AddSongOutcome::Cancelled) => self.prompt.say("No song selected.")?,
            Err(e) => {
                let e = Error::from(e);
                self.prompt.say(&e)?;
                if e.is_fatal_catalog_error() {
                    self.prompt.say("Check the catalog credentials in your configuration.")?;
                }
            }
        }
        Ok(())
    }

    fn list_songs(&mut self) -> Result<()> {
        let songs = self.service.all_songs();
        if songs.is_empty() {
            self.prompt.say("The library is empty.")?;
        }
        self.print_songs(&songs)
    }

    fn remove_song(&mut self) -> Result<()> {
        let Some(title) = self.prompt.read_line("Enter song title to remove: ")? else {
            return Ok(());
        };
        let Some(artist) = self.prompt.read_line("Enter artist (leave blank for any): ")? else {
            return Ok(());
        };

        let removed = if artist.is_empty() {
            self.service.remove_song(&title)
        } else {
            self.service.remove_song_by(&title, &artist)
        };
        if removed {
            self.prompt.say("Song removed.")?;
        } else {
            self.prompt.say("Song not found.")?;
        }
        Ok(())
    }

    fn create_playlist(&mut self) -> Result<()> {
        let Some(name) = self.prompt.read_line("Enter playlist name: ")? else {
            return Ok(());
        };
        match self.service.create_playlist(&name) {
            Ok(()) => self.prompt.say(format_args!("Playlist '{}' created.", name.trim()))?,
            Err(e) => self.prompt.say(e)?,
        }
        Ok(())
    }

    fn add_to_playlist(&mut self) -> Result<()> {
        let Some((playlist, song)) = self.read_playlist_and_song()? else {
            return Ok(());
        };
        if self.service.add_song_to_playlist(&playlist, &song) {
            self.prompt.say("Song added to playlist.")?;
        } else {
            self.prompt.say("Playlist or song not found.")?;
        }
        Ok(())
    }

    fn remove_from_playlist(&mut self) -> Result<()> {
        let Some((playlist, song)) = self.read_playlist_and_song()? else {
            return Ok(());
        };
        if self.service.remove_song_from_playlist(&playlist, &song) {
            self.prompt.say("Song removed from playlist.")?;
        } else {
            self.prompt.say("Playlist or song not found.")?;
        }
        Ok(())
    }

    fn read_playlist_and_song(&mut self) -> Result<Option<(String, String)>> {
        let Some(playlist) = self.prompt.read_line("Enter playlist name: ")? else {
            return Ok(None);
        };
        let Some(song) = self.prompt.read_line("Enter song (Artist - Title): ")? else {
            return Ok(None);
        };
        Ok(Some((playlist, song)))
    }

    fn view_playlist(&mut self) -> Result<()> {
        let Some(name) = self.prompt.read_line("Enter playlist name: ")? else {
            return Ok(());
        };
        let Some(name) = self.service.find_playlist(&name).map(|p| p.name().to_string()) else {
            self.prompt.say("Playlist not found.")?;
            return Ok(());
        };

        let songs = self.service.view_songs_in_playlist(&name);
        self.prompt.say(format_args!("Playlist: {}", name))?;
        if songs.is_empty() {
            self.prompt.say("This playlist is empty.")?;
        }
        self.print_songs(&songs)
    }

    fn delete_playlist(&mut self) -> Result<()> {
        let Some(name) = self.prompt.read_line("Enter playlist name to delete: ")? else {
            return Ok(());
        };
        if self.service.delete_playlist(&name) {
            self.prompt.say("Playlist deleted.")?;
        } else {
            self.prompt.say("Playlist not found.")?;
        }
        Ok(())
    }

    fn search_songs(&mut self) -> Result<()> {
        let Some(query) = self.prompt.read_line("Enter search query: ")? else {
            return Ok(());
        };
        let fields = if self.prompt.confirm("Also match artist and genre? [y/N]: ")? {
            SearchFields::all()
        } else {
            SearchFields::TITLE
        };

        let songs = self.service.search_songs_in(&query, fields);
        if songs.is_empty() {
            self.prompt.say("No songs found.")?;
        }
        self.print_songs(&songs)
    }

    fn search_playlists(&mut self) -> Result<()> {
        let Some(query) = self.prompt.read_line("Enter search query: ")? else {
            return Ok(());
        };

        let lines: Vec<String> = self
            .service
            .search_playlists(&query)
            .into_iter()
            .map(|p| format!("{} ({} songs)", p.name(), p.len()))
            .collect();
        if lines.is_empty() {
            self.prompt.say("No playlists found.")?;
        }
        for line in lines {
            self.prompt.say(line)?;
        }
        Ok(())
    }

    fn shuffle(&mut self) -> Result<()> {
        let songs = self.service.shuffled_songs();
        if songs.is_empty() {
            self.prompt.say("The library is empty.")?;
            return Ok(());
        }
        self.prompt.say("Shuffled play order:")?;
        self.print_songs(&songs)
    }

    fn edit_song(&mut self) -> Result<()> {
        let Some(title) = self.prompt.read_line("Enter title of the song to edit: ")? else {
            return Ok(());
        };
        let Some(artist) = self.prompt.read_line("Enter its artist: ")? else {
            return Ok(());
        };
        self.prompt.say("Leave a field blank to keep its current value.")?;

        let mut edit = SongEdit::default();
        for (label, field) in [
            ("New title: ", &mut edit.title),
            ("New artist: ", &mut edit.artist),
            ("New genre: ", &mut edit.genre),
            ("New link: ", &mut edit.link),
        ] {
            let Some(value) = self.prompt.read_line(label)? else {
                return Ok(());
            };
            *field = Some(value).filter(|v| !v.is_empty());
        }
        if edit.is_empty() {
            self.prompt.say("Nothing to change.")?;
            return Ok(());
        }

        match self.service.update_song(&title, &artist, edit) {
            Ok(Some(song)) => self.prompt.say(format_args!("Song updated: {}", song))?,
            Ok(None) => self.prompt.say("Song not found.")?,
            Err(e) => self.prompt.say(e)?,
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        match storage::save(&self.data_file, self.service.playlists()) {
            Ok(()) => {
                info!(target: "cli", path = %self.data_file.display(), "Library saved");
                self.prompt.say(format_args!("Library saved to {}.", self.data_file.display()))?;
            }
            Err(e) => {
                warn!(target: "cli", error = %e, "Save failed");
                self.prompt.say(format_args!("Could not save the library: {}", e))?;
            }
        }
        Ok(())
    }

    fn print_songs(&mut self, songs: &[SharedSong]) -> Result<()> {
        for (i, song) in songs.iter().enumerate() {
            self.prompt.say(format_args!("{}. {}", i + 1, song))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::catalog::traits::mocks::MockCatalog;
    use crate::library::InMemorySongRepository;
    use crate::test_utils::library_with;
    use std::io::Cursor;
    use std::path::Path;

    type TestSession =
        Session<InMemorySongRepository, MockCatalog, Cursor<Vec<u8>>, Vec<u8>>;

    fn session(
        service: LibraryService<InMemorySongRepository, MockCatalog>,
        script: &[&str],
        data_file: &Path,
        autosave: bool,
    ) -> TestSession {
        let mut input = script.join("\n");
        input.push('\n');
        let prompt = ConsolePrompt::new(Cursor::new(input.into_bytes()), Vec::new());
        Session::new(service, prompt, data_file.to_path_buf(), autosave)
    }

    async fn run(
        mut session: TestSession,
    ) -> (LibraryService<InMemorySongRepository, MockCatalog>, String) {
        session.run().await.unwrap();
        let (service, prompt) = session.into_parts();
        (service, String::from_utf8(prompt.into_output()).unwrap())
    }

    #[test]
    fn test_menu_numbers() {
        assert_eq!(MenuChoice::from_number(1), Some(MenuChoice::AddSong));
        assert_eq!(MenuChoice::from_number(13), Some(MenuChoice::Save));
        assert_eq!(MenuChoice::from_number(0), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(14), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(15), None);
    }

    #[tokio::test]
    async fn test_add_song_and_build_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let service = LibraryService::new(
            InMemorySongRepository::new(),
            MockCatalog::with_tracks(&[
                ("Queen", "Bohemian Rhapsody", "https://open.spotify.com/track/1"),
                ("Queen", "Bohemian Rhapsody - Live", "https://open.spotify.com/track/2"),
            ]),
        );
        let script = [
            "1", "Bohemian Rhapsody", "Queen", "Rock", "1", //
            "4", "Road Trip", //
            "5", "road trip", "queen - bohemian rhapsody", //
            "7", "Road Trip", //
            "0",
        ];

        let (service, out) = run(session(service, &script, &path, false)).await;

        assert!(out.contains("Song added: Queen - Bohemian Rhapsody [Rock]"));
        assert!(out.contains("Playlist 'Road Trip' created."));
        assert!(out.contains("Song added to playlist."));
        assert!(out.contains("Playlist: Road Trip"));
        assert_eq!(service.view_songs_in_playlist("Road Trip").len(), 1);
        assert_eq!(service.catalog().queries(), vec!["Bohemian Rhapsody Queen"]);
    }

    #[tokio::test]
    async fn test_invalid_choice_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let script = ["42", "abc", "2", "14"];
        let (_, out) = run(session(library_with(&[]), &script, &path, false)).await;

        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("Please enter a number."));
        assert!(out.contains("The library is empty."));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_catalog_failure_keeps_session_alive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let service = LibraryService::new(
            InMemorySongRepository::new(),
            MockCatalog::with_error(CatalogError::Auth("invalid_client".to_string())),
        );
        let script = ["1", "Song", "Artist", "", "4", "Still Works", "0"];

        let (service, out) = run(session(service, &script, &path, false)).await;

        assert!(out.contains("Error fetching from catalog"));
        assert!(out.contains("Check the catalog credentials"));
        assert!(service.find_playlist("Still Works").is_some());
    }

    #[tokio::test]
    async fn test_transient_catalog_failure_has_no_credentials_hint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let service = LibraryService::new(
            InMemorySongRepository::new(),
            MockCatalog::with_error(CatalogError::Transient("HTTP 503".to_string())),
        );
        let script = ["1", "Song", "Artist", "", "0"];

        let (_, out) = run(session(service, &script, &path, false)).await;

        assert!(out.contains("Error fetching from catalog: "));
        assert!(!out.contains("Check the catalog credentials"));
    }

    #[tokio::test]
    async fn test_remove_song_cascades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let mut service = library_with(&[("Imagine", "John Lennon"), ("Hello", "Adele")]);
        service.create_playlist("Mix").unwrap();
        service.add_song_to_playlist("Mix", "John Lennon - Imagine");

        let script = ["3", "imagine", "", "3", "imagine", "", "0"];
        let (service, out) = run(session(service, &script, &path, false)).await;

        assert!(out.contains("Song removed."));
        assert!(out.contains("Song not found."));
        assert!(service.view_songs_in_playlist("Mix").is_empty());
        assert_eq!(service.all_songs().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_song_keeps_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let service = library_with(&[("Imagine", "John Lennon")]);
        let script = ["12", "imagine", "john lennon", "", "", "Soft Rock", "", "0"];

        let (service, out) = run(session(service, &script, &path, false)).await;

        assert!(out.contains("Song updated"));
        let song = service.repository().find_by_title("Imagine").unwrap();
        assert_eq!(song.read().genre, "Soft Rock");
        assert_eq!(song.read().artist, "John Lennon");
    }

    #[tokio::test]
    async fn test_search_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        let service = library_with(&[("Imagine", "John Lennon"), ("Hello", "Adele")]);

        let script = ["9", "adele", "y", "9", "adele", "n", "0"];
        let (_, out) = run(session(service, &script, &path, false)).await;

        assert!(out.contains("1. Adele - Hello"));
        assert!(out.contains("No songs found."));
    }

    #[tokio::test]
    async fn test_autosave_on_exit_and_at_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");

        let (_, out) = run(session(library_with(&[]), &["4", "Saved"], &path, true)).await;
        assert!(out.contains("Library saved to"));

        let mut repo = InMemorySongRepository::new();
        let loaded = storage::load(&path, &mut repo).unwrap();
        assert_eq!(loaded[0].name(), "Saved");
    }

    #[tokio::test]
    async fn test_no_autosave_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");

        run(session(library_with(&[]), &["4", "Unsaved", "0"], &path, false)).await;
        assert!(!path.exists());

        run(session(library_with(&[]), &["4", "Explicit", "13", "0"], &path, false)).await;
        assert!(path.exists());
    }
}
