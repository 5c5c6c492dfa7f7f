//! Client-credentials token exchange with an in-memory token cache.
//!
//! The token is fetched lazily on first use and reused until it expires
//! (see [`AccessToken::EXPIRY_SKEW`]). A 401 from the search endpoint
//! invalidates it so the next call fetches a fresh one.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::dto;
use crate::catalog::domain::{AccessToken, CatalogCredentials, CatalogError};

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// Token provider for the catalog API
pub struct TokenProvider {
    http_client: reqwest::Client,
    token_url: String,
    credentials: CatalogCredentials,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(
        http_client: reqwest::Client,
        token_url: impl Into<String>,
        credentials: CatalogCredentials,
    ) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Get a valid bearer token, fetching a new one only when needed.
    pub async fn access_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && !token.is_expired(Instant::now())
        {
            return Ok(token.value.clone());
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Drop the cached token.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    /// Whether a token is cached and still valid.
    #[cfg(test)]
    pub async fn has_valid_token(&self) -> bool {
        self.cached
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.is_expired(Instant::now()))
    }

    async fn fetch_token(&self) -> Result<AccessToken, CatalogError> {
        tracing::debug!(target: "catalog::auth", url = %self.token_url, "Requesting access token");

        let issued_at = Instant::now();
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Transient(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            let message = match response.json::<dto::AuthErrorResponse>().await {
                Ok(err) => match err.error_description {
                    Some(desc) => format!("{}: {}", err.error, desc),
                    None => err.error,
                },
                Err(_) => format!("HTTP {}", status),
            };
            return Err(CatalogError::Auth(message));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if status.is_server_error() {
            return Err(CatalogError::Transient(format!("HTTP {}", status)));
        }

        if !status.is_success() {
            return Err(CatalogError::Api(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let lifetime = body
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);

        tracing::info!(target: "catalog::auth", expires_in = lifetime.as_secs(), "Obtained access token");
        Ok(AccessToken::new(body.access_token, issued_at, lifetime))
    }

    /// Seed the cache directly
    #[cfg(test)]
    pub async fn set_cached(&self, token: AccessToken) {
        *self.cached.lock().await = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TokenProvider {
        TokenProvider::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/token",
            CatalogCredentials::new("id", "secret"),
        )
    }

    #[tokio::test]
    async fn test_cached_token_is_reused() {
        let provider = provider();
        provider
            .set_cached(AccessToken::new(
                "cached-token",
                Instant::now(),
                Duration::from_secs(3600),
            ))
            .await;

        // No request is made: the token URL is unreachable
        let token = provider.access_token().await.unwrap();
        assert_eq!(token, "cached-token");
        assert!(provider.has_valid_token().await);
    }

    #[tokio::test]
    async fn test_invalidate_clears_cache() {
        let provider = provider();
        provider
            .set_cached(AccessToken::new("t", Instant::now(), Duration::from_secs(3600)))
            .await;

        provider.invalidate().await;
        assert!(!provider.has_valid_token().await);
    }

    #[tokio::test]
    async fn test_expired_token_is_not_valid() {
        let provider = provider();
        provider
            .set_cached(AccessToken::new("t", Instant::now(), Duration::from_secs(1)))
            .await;

        assert!(!provider.has_valid_token().await);
    }
}
