//! Spotify HTTP client
//!
//! Handles track search against the Spotify Web API.
//! See: https://developer.spotify.com/documentation/web-api/reference/search
//!
//! Every request is bounded by the configured timeout. A transient failure
//! (network error, timeout, 429, 5xx) is retried once after a short delay;
//! a 401 invalidates the cached token and is retried once with a fresh one.

use std::time::Duration;

use super::{adapter, auth::TokenProvider, dto};
use crate::catalog::domain::{CatalogCredentials, CatalogError, CatalogTrack};
use crate::config::CatalogConfig;

/// User agent string sent with every request
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Spotify API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    auth: TokenProvider,
    base_url: String,
    limit: u32,
    retry_delay: Duration,
}

impl SpotifyClient {
    /// Create a new client from catalog settings and credentials
    ///
    /// The client is configured to:
    /// - Abort any request that exceeds `timeout_secs`
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    pub fn new(
        config: &CatalogConfig,
        credentials: CatalogCredentials,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            auth: TokenProvider::new(http_client.clone(), &config.token_url, credentials),
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
            retry_delay: config.retry_delay(),
        })
    }

    /// Search for tracks matching free text
    ///
    /// Returns an empty list when the catalog has no matches.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogTrack>, CatalogError> {
        let response = match self.search_once(query).await {
            Ok(response) => response,
            Err(CatalogError::Unauthorized) => {
                tracing::warn!(target: "catalog::spotify", "Access token rejected, refreshing");
                self.auth.invalidate().await;
                self.search_once(query).await?
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(target: "catalog::spotify", error = %e, "Search failed, retrying once");
                tokio::time::sleep(self.retry_delay).await;
                self.search_once(query).await?
            }
            Err(e) => return Err(e),
        };

        let tracks = adapter::to_tracks(response);
        tracing::debug!(target: "catalog::spotify", query, results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    async fn search_once(&self, query: &str) -> Result<dto::SearchResponse, CatalogError> {
        let token = self.auth.access_token().await?;
        self.send_search_request(&token, query).await
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        token: &str,
        query: &str,
    ) -> Result<dto::SearchResponse, CatalogError> {
        let url = self.search_url(query);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CatalogError::Transient(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if status.is_server_error() {
            return Err(CatalogError::Transient(format!("HTTP {}", status)));
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiErrorResponse>().await {
                return Err(CatalogError::Api(error.error.message));
            }
            return Err(CatalogError::Api(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&type=track&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        )
    }
}
