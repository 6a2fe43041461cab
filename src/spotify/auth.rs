use reqwest::{Client, StatusCode, Url};

use crate::{
    config::Settings,
    types::{Token, TokenResponse},
    utils,
};

use super::SpotifyError;

/// Used when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Builds the Spotify authorization URL for the PKCE flow.
///
/// The user is sent to this URL by the login handler. Spotify redirects back to
/// the configured redirect URI with a `code` query parameter once the user has
/// granted access. `show_dialog=true` forces the consent screen so that a user
/// can switch accounts after logging out.
///
/// # Arguments
///
/// * `settings` - Client ID, redirect URI, scope and authorize endpoint
/// * `code_challenge` - SHA256 challenge derived from the session's code verifier
///
/// # Errors
///
/// Returns an error when the configured authorize endpoint is not a valid URL.
///
/// # Example
///
/// ```
/// let verifier = utils::generate_code_verifier();
/// let challenge = utils::generate_code_challenge(&verifier);
/// let url = authorize_url(&settings, &challenge)?;
/// ```
pub fn authorize_url(settings: &Settings, code_challenge: &str) -> Result<String, String> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", settings.scope.as_str()),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received on the callback for an access token. The verifier must be the one
/// whose challenge was sent in the authorization URL.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `settings` - Client ID, redirect URI and token endpoint
/// * `code` - Authorization code received on the callback
/// * `verifier` - PKCE code verifier generated when the login started
///
/// # Errors
///
/// - [`SpotifyError::Unauthorized`] when Spotify refuses the grant (expired or
///   reused code, verifier mismatch)
/// - [`SpotifyError::Http`] for network, timeout and decoding failures
pub async fn exchange_code_pkce(
    http: &Client,
    settings: &Settings,
    code: &str,
    verifier: &str,
) -> Result<Token, SpotifyError> {
    let response = http
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let body = token_body(response).await?;
    Ok(into_token(body, None))
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token. When the response carries
/// none, the previous one is kept so that later refreshes keep working.
///
/// # Errors
///
/// - [`SpotifyError::Unauthorized`] when the refresh token was revoked
/// - [`SpotifyError::Http`] for network, timeout and decoding failures
pub async fn refresh_token(
    http: &Client,
    settings: &Settings,
    refresh_token: &str,
) -> Result<Token, SpotifyError> {
    let response = http
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.client_id.as_str()),
        ])
        .send()
        .await?;

    let body = token_body(response).await?;
    Ok(into_token(body, Some(refresh_token)))
}

async fn token_body(response: reqwest::Response) -> Result<TokenResponse, SpotifyError> {
    match response.status() {
        status if status.is_success() => Ok(response.json::<TokenResponse>().await?),
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(SpotifyError::Unauthorized),
        status => Err(SpotifyError::Status(status)),
    }
}

/// Turns a token endpoint body into a [`Token`], keeping `previous_refresh`
/// when the body carries no refresh token.
pub fn into_token(body: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token: body
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        obtained_at: utils::now_secs(),
    }
}
