use chrono::Utc;

use crate::{
    config,
    error::{Error, Result},
    types::{Token, TokenResponse},
};

use super::SpotifyClient;

/// Tokens within this many seconds of expiry are treated as expired, so a
/// request never departs with a token that dies in flight.
const EXPIRY_BUFFER_SECS: u64 = 240;

impl SpotifyClient {
    /// Returns a valid access token, performing the client-credentials
    /// exchange on first use and again whenever the cached token nears
    /// expiry.
    ///
    /// The token is an application-level bearer token: no user consent is
    /// involved and no refresh token exists, so "refresh" simply repeats
    /// the exchange.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] with status and body when the exchange
    /// answers non-2xx, or [`Error::Http`] on transport failure.
    pub(crate) async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if !is_expired(token) {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.acquire_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }

    async fn acquire_token(&self) -> Result<Token> {
        let response = self
            .http
            .post(&config::spotify_apitoken_url())
            .basic_auth(config::spotify_client_id(), Some(config::spotify_client_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth { status, body });
        }

        let json = response.json::<TokenResponse>().await?;

        Ok(Token {
            access_token: json.access_token,
            expires_in: json.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now >= token.obtained_at + token.expires_in.saturating_sub(EXPIRY_BUFFER_SECS)
}
