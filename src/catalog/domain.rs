//! Internal domain models for catalog lookups.
//!
//! These types are OUR types - they don't change when the catalog API changes.
//! Wire responses get converted into these types by the adapter.

use std::fmt;
use std::time::{Duration, Instant};

use crate::model::STANDARDIZED_NAME_DELIMITER;

/// A candidate track returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    /// Primary artist name
    pub artist: String,
    /// Track title
    pub title: String,
    /// External playback URL (empty if the catalog had none)
    pub url: String,
}

impl CatalogTrack {
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// Standardized `"Artist - Title"` label shown to the user.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.artist, STANDARDIZED_NAME_DELIMITER, self.title)
    }
}

/// Client-credentials pair for the catalog's token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct CatalogCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl CatalogCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keep the secret out of logs
impl fmt::Debug for CatalogCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token with its expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: Instant,
}

impl AccessToken {
    /// Tokens are treated as expired this long before the catalog says so.
    pub const EXPIRY_SKEW: Duration = Duration::from_secs(30);

    /// Build a token that expires `lifetime` after `issued_at`.
    pub fn new(value: impl Into<String>, issued_at: Instant, lifetime: Duration) -> Self {
        Self {
            value: value.into(),
            expires_at: issued_at + lifetime.saturating_sub(Self::EXPIRY_SKEW),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Errors that can occur during a catalog lookup
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog is not configured: {0}")]
    Configuration(String),

    #[error("Catalog authentication failed: {0}")]
    Auth(String),

    #[error("Access token rejected by the catalog")]
    Unauthorized,

    #[error("Network error: {0}")]
    Transient(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("API request failed: {0}")]
    Api(String),
}

impl CatalogError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::RateLimited)
    }

    /// Whether no request can ever succeed without fixing configuration.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_format() {
        let track = CatalogTrack::new("Queen", "Bohemian Rhapsody", "https://x");
        assert_eq!(track.label(), "Queen - Bohemian Rhapsody");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = CatalogCredentials::new("id-123", "super-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("id-123"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_token_expiry_applies_skew() {
        let now = Instant::now();
        let token = AccessToken::new("abc", now, Duration::from_secs(3600));
        assert!(!token.is_expired(now));
        assert!(!token.is_expired(now + Duration::from_secs(3500)));
        assert!(token.is_expired(now + Duration::from_secs(3570)));
    }

    #[test]
    fn test_short_lived_token_is_expired_immediately() {
        let now = Instant::now();
        let token = AccessToken::new("abc", now, Duration::from_secs(10));
        assert!(token.is_expired(now));
    }

    #[test]
    fn test_error_classification() {
        assert!(CatalogError::Transient("timeout".into()).is_transient());
        assert!(CatalogError::RateLimited.is_transient());
        assert!(!CatalogError::Parse("bad".into()).is_transient());
        assert!(CatalogError::Configuration("missing".into()).is_fatal());
        assert!(CatalogError::Auth("invalid_client".into()).is_fatal());
        assert!(!CatalogError::Unauthorized.is_fatal());
    }
}
