//! # Spotify Integration Module
//!
//! This module provides the thin slice of the Spotify Web API that the listener
//! rating needs: the OAuth 2.0 PKCE token endpoints and four read-only calls on
//! behalf of a logged-in user.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! Session gate (management)  ──→  auth (authorize URL, code exchange, refresh)
//!          ↓
//! SpotifyClient (profile, top items, artists)
//!          ↓
//! reqwest (shared client with bounded timeout)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile ([`SpotifyClient::get_current_user`])
//! - `GET /me/top/artists` - top artists per time range ([`SpotifyClient::get_top_artists`])
//! - `GET /me/top/tracks` - top tracks per time range ([`SpotifyClient::get_top_tracks`])
//! - `GET /artists/{id}` - single artist with genres ([`SpotifyClient::get_artist`])
//! - `POST /api/token` - code exchange and refresh ([`auth`])
//!
//! ## Error Handling
//!
//! Every call returns a [`SpotifyError`]. A `401` is surfaced as
//! [`SpotifyError::Unauthorized`] so handlers can send the user back to the
//! login page. Rate limiting is handled by honoring `Retry-After` once, and
//! `502 Bad Gateway` responses are retried a bounded number of times.
//!
//! Those waits happen inside a single call, so the reqwest timeout alone does
//! not bound it. Callers that must answer in time wrap each call in
//! [`bounded`], which turns an overrun into [`SpotifyError::Timeout`].
//!
//! ## Aggregation Seam
//!
//! The genre aggregation does not talk to [`SpotifyClient`] directly but to the
//! [`ListeningSource`] trait, which the client implements. Tests plug in fakes.

use std::{fmt, future::Future, time::Duration};

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::{sleep, timeout};

use crate::{
    types::{Artist, RecencyWindow, Track},
    warning,
};

pub mod artists;
pub mod auth;
pub mod profile;
pub mod top;

/// Longest `Retry-After` the client is willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const MAX_BAD_GATEWAY_RETRIES: u32 = 2;
const BAD_GATEWAY_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum SpotifyError {
    /// Network failure, timeout, or a body that could not be decoded.
    Http(reqwest::Error),
    /// The access token was rejected or a grant was refused.
    Unauthorized,
    /// Spotify asked to back off for longer than we are willing to wait.
    RateLimited(u64),
    /// Any other non-success status.
    Status(StatusCode),
    /// The call, retries and back-off included, did not finish in time.
    Timeout(Duration),
}

impl SpotifyError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized)
    }
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::Http(e) => write!(f, "HTTP error: {}", e),
            SpotifyError::Unauthorized => write!(f, "unauthorized"),
            SpotifyError::RateLimited(secs) => {
                write!(f, "rate limited, retry after {} seconds", secs)
            }
            SpotifyError::Status(status) => write!(f, "unexpected status: {}", status),
            SpotifyError::Timeout(limit) => write!(f, "timed out after {:?}", limit),
        }
    }
}

impl std::error::Error for SpotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpotifyError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        SpotifyError::Http(err)
    }
}

/// Runs a Spotify call with an overall deadline.
///
/// The deadline covers everything the call does, including `Retry-After`
/// sleeps and `502` retries. When it passes, the call is dropped and
/// [`SpotifyError::Timeout`] is returned.
///
/// # Arguments
///
/// * `limit` - Longest time the call may take
/// * `call` - The pending call
///
/// # Example
///
/// ```
/// let artist = bounded(settings.http_timeout, client.get_artist(id)).await?;
/// ```
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, SpotifyError>
where
    F: Future<Output = Result<T, SpotifyError>>,
{
    match timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(SpotifyError::Timeout(limit)),
    }
}

/// Listening history as seen by the genre aggregation.
pub trait ListeningSource {
    /// Top artists of the current user for `window`, at most `limit` of them.
    fn top_artists(
        &self,
        window: RecencyWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Artist>, SpotifyError>> + Send;

    /// Top tracks of the current user for `window`, at most `limit` of them.
    fn top_tracks(
        &self,
        window: RecencyWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Track>, SpotifyError>> + Send;

    /// Full artist record, including its genre list.
    fn artist(&self, id: &str) -> impl Future<Output = Result<Artist, SpotifyError>> + Send;
}

/// Spotify Web API client bound to one user's access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SpotifyError> {
        let url = format!("{}{}", self.api_url, path);
        let mut bad_gateway_retries = 0;
        let mut rate_limit_retried = false;

        loop {
            let response = self
                .http
                .get(&url)
                .query(query)
                .bearer_auth(&self.access_token)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => return Ok(response.json::<T>().await?),
                StatusCode::UNAUTHORIZED => return Err(SpotifyError::Unauthorized),
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = retry_after_secs(&response);
                    if rate_limit_retried || retry_after > MAX_RETRY_AFTER_SECS {
                        warning!(
                            "Retry after has reached {} seconds for {}, giving up.",
                            retry_after,
                            path
                        );
                        return Err(SpotifyError::RateLimited(retry_after));
                    }
                    rate_limit_retried = true;
                    sleep(Duration::from_secs(retry_after)).await;
                }
                StatusCode::BAD_GATEWAY if bad_gateway_retries < MAX_BAD_GATEWAY_RETRIES => {
                    bad_gateway_retries += 1;
                    sleep(BAD_GATEWAY_PAUSE).await;
                }
                status => return Err(SpotifyError::Status(status)),
            }
        }
    }
}

impl ListeningSource for SpotifyClient {
    fn top_artists(
        &self,
        window: RecencyWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Artist>, SpotifyError>> + Send {
        self.get_top_artists(window, limit)
    }

    fn top_tracks(
        &self,
        window: RecencyWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Track>, SpotifyError>> + Send {
        self.get_top_tracks(window, limit)
    }

    fn artist(&self, id: &str) -> impl Future<Output = Result<Artist, SpotifyError>> + Send {
        self.get_artist(id)
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
}
