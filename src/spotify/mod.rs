//! # Spotify Integration Module
//!
//! Implements the provider and sink sides of songlist against the Spotify
//! Web API: authentication, artist search, release listings, track lists
//! and playlist writes.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!          ↓
//! catalog (pure merge engine)  ←  provider::CatalogProvider / sink::PlaylistSink
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Artist Search
//!     ├── Release Listings and Track Lists
//!     └── Playlist Writes
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! ### Rate Limiting
//! - **Retry-After**: 429 responses are retried after the advertised delay,
//!   as long as it stays at or below 120 seconds
//! - **Excessive Delays**: Longer delays abort the request with a warning
//!
//! ### Network Resilience
//! - **Bad Gateway**: 502 responses are retried after 10 seconds, at most
//!   [`MAX_RETRIES`] times
//! - **Other Errors**: Propagated to the caller unchanged
//!
//! ### Authentication
//! - **Token Expiration**: Tokens are refreshed 4 minutes before expiry by
//!   [`TokenManager`](crate::management::TokenManager)
//!
//! ## API Coverage
//!
//! - `GET /search?type=artist` - Artist lookup by name
//! - `GET /artists/{id}/albums` - Artist discography, all groups, paged
//! - `GET /albums/{id}/tracks` - Track list of a release, paged
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to a playlist
//! - `POST /api/token` - Token exchange and refresh

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod releases;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    Res,
    catalog::ReleaseCandidate,
    config,
    management::TokenManager,
    provider::CatalogProvider,
    types::{AlbumTrack, Artist},
    warning,
};

/// Attempts made for a request answered with 502 or 429 before giving up.
pub const MAX_RETRIES: u32 = 5;

/// Longest `Retry-After` delay that is waited out.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Authenticated Spotify Web API client.
pub struct SpotifyClient {
    client: Client,
    api_url: String,
    market: Option<String>,
    token_mgr: TokenManager,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager, api_url: String, market: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            market,
            token_mgr,
        }
    }

    /// Builds a client from the cached token and the environment.
    pub async fn connect() -> Res<Self> {
        let token_mgr = TokenManager::load()
            .await
            .map_err(|e| format!("Failed to load token. Please run songlist auth\n Error: {}", e))?;

        Ok(Self::new(
            token_mgr,
            config::spotify_apiurl()?,
            config::spotify_market(),
        ))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Sends the request built by `request`, authenticated with a valid
    /// token, and retries on 502 and 429 responses.
    async fn send<F>(&mut self, request: F) -> Res<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.token_mgr.get_valid_token().await;
            let response = request(&self.client).bearer_auth(token).send().await?;

            match response.status() {
                StatusCode::BAD_GATEWAY if attempt < MAX_RETRIES => {
                    sleep(Duration::from_secs(10)).await;
                }
                StatusCode::TOO_MANY_REQUESTS if attempt < MAX_RETRIES => {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);

                    if retry_after > MAX_RETRY_AFTER_SECS {
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Try again later.",
                            retry_after
                        );
                        return Err(format!(
                            "Rate limited by Spotify for {} seconds",
                            retry_after
                        )
                        .into());
                    }
                    sleep(Duration::from_secs(retry_after)).await;
                }
                _ => return Ok(response.error_for_status()?),
            }
        }
    }

    async fn request_json<T, F>(&mut self, request: F) -> Res<T>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    fn market_query(&self) -> Vec<(&'static str, String)> {
        self.market
            .iter()
            .map(|market| ("market", market.clone()))
            .collect()
    }
}

impl CatalogProvider for SpotifyClient {
    async fn search_artists(&mut self, query: &str) -> Res<Vec<Artist>> {
        artists::search(self, query).await
    }

    async fn artist_releases(&mut self, artist_id: &str) -> Res<Vec<ReleaseCandidate>> {
        releases::get_releases_for_artist(self, artist_id).await
    }

    async fn release_tracks(&mut self, release_id: &str) -> Res<Vec<AlbumTrack>> {
        releases::get_release_tracks(self, release_id).await
    }
}
