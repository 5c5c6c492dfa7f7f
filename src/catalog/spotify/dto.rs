//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify API returns for the two endpoints we use.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! - `POST https://accounts.spotify.com/api/token` (client credentials flow)
//! - `GET  https://api.spotify.com/v1/search?type=track`

use serde::{Deserialize, Serialize};

/// Token endpoint response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer" for this flow
    pub token_type: Option<String>,
    /// Lifetime in seconds
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

/// Token endpoint error (OAuth style)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// Search endpoint response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Present because we request `type=track`
    pub tracks: TrackPage,
}

/// Paging object wrapping track results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
    pub total: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Full track object (only the fields we read)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub duration_ms: Option<u64>,
    pub album: Option<SimpleAlbum>,
}

/// Simplified artist object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

/// Simplified album object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimpleAlbum {
    pub id: Option<String>,
    pub name: String,
}

/// Known external URLs for an object
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Web API error response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
