//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tuneshelf\config.toml
//! - macOS: ~/Library/Application Support/tuneshelf/config.toml
//! - Linux: ~/.config/tuneshelf/config.toml
//!
//! Catalog credentials may also come from the command line or the
//! `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` environment variables,
//! which take precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::CatalogCredentials;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API credentials
    pub credentials: Credentials,

    /// Catalog endpoint and request settings
    pub catalog: CatalogConfig,

    /// Library storage settings
    pub library: LibraryConfig,
}

/// Catalog client credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Credentials {
    /// Resolve both halves of the credential pair.
    ///
    /// Blank values count as missing.
    pub fn catalog_credentials(&self) -> Result<CatalogCredentials, ConfigError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (present(&self.client_id), present(&self.client_secret)) {
            (Some(id), Some(secret)) => Ok(CatalogCredentials::new(id, secret)),
            (None, _) => Err(ConfigError::MissingCredential("client_id")),
            (_, None) => Err(ConfigError::MissingCredential("client_secret")),
        }
    }
}

/// Catalog endpoint and request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the Web API (search is `{api_base_url}/search`)
    pub api_base_url: String,

    /// Client-credentials token endpoint
    pub token_url: String,

    /// Maximum number of candidates per search
    pub limit: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Delay before the single retry of a transient failure
    pub retry_delay_ms: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.spotify.com/v1".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            limit: 10,
            timeout_secs: 10,
            retry_delay_ms: 500,
        }
    }
}

/// Library storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// JSON file holding saved playlists
    pub data_file: PathBuf,

    /// Save playlists when the interactive session ends
    pub save_on_exit: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(crate::storage::DEFAULT_DATA_FILE),
            save_on_exit: true,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// `<os config dir>/tuneshelf`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tuneshelf"))
}

/// `<os config dir>/tuneshelf/config.toml`
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
///
/// Never fails; see [`load_from`].
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!(target: "config", "No config directory on this platform, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path.
///
/// A missing, unreadable or malformed file yields the defaults; the
/// problem is logged rather than returned.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!(target: "config", path = %path.display(), "No config file, using defaults");
        return Config::default();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|contents| toml::from_str::<Config>(&contents).map_err(|e| e.to_string()));

    match parsed {
        Ok(config) => {
            tracing::debug!(target: "config", path = %path.display(), "Loaded config");
            config
        }
        Err(error) => {
            tracing::warn!(target: "config", path = %path.display(), %error, "Ignoring unusable config file");
            Config::default()
        }
    }
}

/// Save configuration to the default location, returning the path written.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to an explicit path.
///
/// The file is written next to its target and renamed into place, so a
/// failed write never leaves a truncated config behind.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let staged = path.with_extension("toml.tmp");
    std::fs::write(&staged, contents).map_err(|e| ConfigError::Write(staged.clone(), e))?;
    std::fs::rename(&staged, path).map_err(|e| ConfigError::Rename(staged, path.to_path_buf(), e))?;

    tracing::info!(target: "config", path = %path.display(), "Saved config");
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "Catalog {0} is not set. Use --client-id/--client-secret, set SPOTIFY_CLIENT_ID/SPOTIFY_CLIENT_SECRET, or add it to the [credentials] section of the config file"
    )]
    MissingCredential(&'static str),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
