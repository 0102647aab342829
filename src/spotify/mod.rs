//! # Spotify Integration Module
//!
//! This module implements the client side of every Spotify Web API call the
//! pipeline needs. It owns HTTP communication, the application-level token,
//! rate-limit handling, and the typed deserialization of upstream payloads,
//! so malformed responses fail at this boundary instead of deep inside the
//! ingestion pipeline.
//!
//! ## Core Modules
//!
//! - [`auth`] - Client-credentials token exchange and in-memory token cache
//! - [`artists`] - Artist search (first-ranked match by free-text name)
//! - [`releases`] - Discography and album-track listings with full pagination
//! - [`features`] - Batched audio-feature retrieval, order-preserving
//!
//! ## API Coverage
//!
//! - `POST {token_url}` - Client-credentials token exchange
//! - `GET /search` - Artist search
//! - `GET /artists/{id}/albums` - Artist's discography, paginated
//! - `GET /albums/{id}/tracks` - Album track listing, paginated
//! - `GET /audio-features` - Batch audio features, max 100 ids per call
//!
//! ## Error Handling
//!
//! Transient failures (5xx, timeouts) are retried up to [`MAX_RETRIES`]
//! times with a linear backoff; 429 Too Many Requests honors the
//! `Retry-After` header for delays up to 120 seconds. Client errors (4xx)
//! are never retried and propagate as [`Error::Upstream`] with status and
//! body preserved for diagnostics.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config,
    error::{Error, Result},
    types::Token,
    warning,
};

pub mod artists;
pub mod auth;
pub mod features;
pub mod releases;

/// Maximum retry attempts for transient (5xx/timeout) failures.
const MAX_RETRIES: u32 = 3;

/// Seconds added to the backoff per failed attempt.
const RETRY_BACKOFF_SECS: u64 = 5;

/// Per-call request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Client for the Spotify Web API.
///
/// One instance is created per request scope. It owns the HTTP connection
/// pool and the cached application token; the token is acquired lazily on
/// the first authenticated call and refreshed when it nears expiry.
pub struct SpotifyClient {
    http: Client,
    token: Mutex<Option<Token>>,
}

impl SpotifyClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            token: Mutex::new(None),
        })
    }

    /// Issues an authenticated GET against the API base URL and decodes the
    /// response into `T`.
    ///
    /// Retry behavior, shared by all endpoints:
    /// - 429: wait for `Retry-After` (when ≤ 120s) and retry without
    ///   counting as a failed attempt
    /// - 5xx or transport timeout: retry up to [`MAX_RETRIES`] times with
    ///   linear backoff
    /// - other non-2xx: propagate immediately with status and body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let api_url = format!("{uri}{path}", uri = &config::spotify_apiurl());
        let mut attempt = 0;

        loop {
            let token = self.bearer_token().await?;
            let response = self
                .http
                .get(&api_url)
                .query(query)
                .bearer_auth(&token)
                .send()
                .await;

            let response = match response {
                Ok(resp) => resp,
                Err(err) => {
                    if (err.is_timeout() || err.is_connect()) && attempt < MAX_RETRIES {
                        attempt += 1;
                        sleep(Duration::from_secs(RETRY_BACKOFF_SECS * attempt as u64)).await;
                        continue; // retry
                    }
                    return Err(Error::Http(err));
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);
                if retry_after <= 120 {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue; // retry
                }
                warning!(
                    "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
                    retry_after
                );
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Upstream { status, body });
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                attempt += 1;
                sleep(Duration::from_secs(RETRY_BACKOFF_SECS * attempt as u64)).await;
                continue; // retry
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Upstream { status, body });
            }

            return Ok(response.json::<T>().await?);
        }
    }
}
