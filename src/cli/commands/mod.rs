//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `interactive`: the numbered menu (default)
//! - `library`: read-only views over the library file
//! - `lookup`: catalog search without touching the library

mod interactive;
mod library;
mod lookup;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::catalog::{CatalogApi, SpotifyClient};
use crate::config::{self, Config};
use crate::error::{Result, ResultExt};
use crate::library::{InMemorySongRepository, LibraryService};
use crate::model::Playlist;
use crate::storage;

pub use interactive::cmd_interactive;
pub use library::{cmd_list, cmd_playlists, cmd_search, cmd_shuffle};
pub use lookup::cmd_lookup;

/// Tuneshelf: songs, playlists and catalog lookups from the console
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Library file (overrides the config file)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog client ID
    #[arg(long, global = true, env = "SPOTIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Catalog client secret
    #[arg(long, global = true, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Show debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu (default)
    Interactive,
    /// List all songs in the library
    List,
    /// List playlists with their song counts
    Playlists,
    /// Search songs in the library
    Search {
        /// Text to look for (case-insensitive)
        query: String,
        /// Match artist and genre as well as title
        #[arg(long)]
        all_fields: bool,
    },
    /// Search the catalog and print the candidates
    Lookup {
        /// Free-text query, e.g. "one more time daft punk"
        query: String,
    },
    /// Print all songs in random order
    Shuffle,
    /// Write the current configuration to the config file
    InitConfig,
}

/// Run the specified CLI command.
///
/// No subcommand means the interactive menu.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = cli.resolve_config();

    match cli.command.as_ref().unwrap_or(&Commands::Interactive) {
        Commands::Interactive => cmd_interactive(&rt, &config),
        Commands::List => cmd_list(&config),
        Commands::Playlists => cmd_playlists(&config),
        Commands::Search { query, all_fields } => cmd_search(&config, query, *all_fields),
        Commands::Lookup { query } => cmd_lookup(&rt, &config, query),
        Commands::Shuffle => cmd_shuffle(&config),
        Commands::InitConfig => cmd_init_config(cli, &config),
    }
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    fn resolve_config(&self) -> Config {
        let mut config = match &self.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        self.apply_overrides(&mut config);
        config
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(id) = &self.client_id {
            config.credentials.client_id = Some(id.clone());
        }
        if let Some(secret) = &self.client_secret {
            config.credentials.client_secret = Some(secret.clone());
        }
        if let Some(path) = &self.data_file {
            config.library.data_file = path.clone();
        }
    }
}

/// Write the resolved configuration to disk
pub fn cmd_init_config(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let path = match &cli.config {
        Some(path) => {
            config::save_to(config, path)?;
            path.clone()
        }
        None => config::save(config)?,
    };
    println!("Wrote configuration to {}", path.display());
    Ok(())
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Build the catalog client, failing if credentials are missing.
pub(crate) fn catalog_client(config: &Config) -> Result<SpotifyClient> {
    let credentials = config.credentials.catalog_credentials()?;
    Ok(SpotifyClient::new(&config.catalog, credentials)?)
}

/// Load the library file into a fresh repository.
pub(crate) fn load_library(path: &Path) -> Result<(InMemorySongRepository, Vec<Playlist>)> {
    let mut repo = InMemorySongRepository::new();
    let playlists = storage::load(path, &mut repo)
        .with_context(format!("Could not load library from {}", path.display()))?;
    Ok((repo, playlists))
}

/// Load the library file into a service backed by `catalog`.
pub(crate) fn open_library<C: CatalogApi>(
    path: &Path,
    catalog: C,
) -> Result<LibraryService<InMemorySongRepository, C>> {
    let (repo, playlists) = load_library(path)?;
    let mut service = LibraryService::new(repo, catalog);
    service.set_playlists(playlists);
    Ok(service)
}
