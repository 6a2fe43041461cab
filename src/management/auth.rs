use reqwest::Client;

use crate::{
    config::Settings,
    spotify::{self, SpotifyError},
    types::Token,
    utils,
};

/// Tokens are refreshed this many seconds before they actually expire.
pub const EXPIRY_BUFFER_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Returns a usable access token, refreshing it first when it is about to
    /// expire.
    pub async fn get_valid_token(
        &mut self,
        http: &Client,
        settings: &Settings,
    ) -> Result<String, SpotifyError> {
        if self.is_expired() {
            self.refresh(http, settings).await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let expires_at = self.token.obtained_at.saturating_add(self.token.expires_in);
        utils::now_secs() >= expires_at.saturating_sub(EXPIRY_BUFFER_SECS)
    }

    async fn refresh(&mut self, http: &Client, settings: &Settings) -> Result<(), SpotifyError> {
        if self.token.refresh_token.is_empty() {
            return Err(SpotifyError::Unauthorized);
        }

        self.token = spotify::auth::refresh_token(http, settings, &self.token.refresh_token).await?;
        Ok(())
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}
