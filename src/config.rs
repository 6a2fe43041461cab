//! Configuration management for the listener rating web app.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. All values are read once at process start into a
//! [`Settings`] value which is then injected into the server state, so nothing
//! below the entry point reads the environment on its own.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-top-read";
pub const DEFAULT_SESSION_LIFETIME_SECS: u64 = 3600;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Session secrets shorter than this are rejected at start-up.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory under
/// `spotirate/.env` first and then in the current working directory. Variables
/// that are already set in the process environment are never overwritten.
/// A missing file is not an error; the server can be configured purely through
/// the environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotirate/.env`
/// - macOS: `~/Library/Application Support/spotirate/.env`
/// - Windows: `%LOCALAPPDATA%/spotirate/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotirate/.env");
    path
}

/// Runtime configuration of the web app.
///
/// Built once by [`Settings::from_env`] and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP server binds to (`SERVER_ADDRESS`).
    pub server_addr: SocketAddr,
    /// Spotify application client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
    pub client_id: String,
    /// OAuth callback URL registered with Spotify (`SPOTIFY_API_REDIRECT_URI`).
    pub redirect_uri: String,
    /// Requested OAuth scopes (`SPOTIFY_API_AUTH_SCOPE`).
    pub scope: String,
    /// Spotify authorize endpoint (`SPOTIFY_API_AUTH_URL`).
    pub auth_url: String,
    /// Spotify token endpoint (`SPOTIFY_API_TOKEN_URL`).
    pub token_url: String,
    /// Spotify Web API base URL (`SPOTIFY_API_URL`).
    pub api_url: String,
    /// Secret the session cookie signing key is derived from (`SESSION_SECRET`).
    pub session_secret: String,
    /// How long a browser session stays valid (`SESSION_LIFETIME_SECS`).
    pub session_lifetime: Duration,
    /// Timeout applied to every outbound HTTP request (`HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,
}

impl Settings {
    /// Reads all settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable is absent and
    /// [`ConfigError::Invalid`] when a value cannot be parsed or the session
    /// secret is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_secret = required("SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "SESSION_SECRET",
                reason: format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            });
        }

        Ok(Self {
            server_addr: parsed("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)?,
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            session_secret,
            session_lifetime: Duration::from_secs(parsed(
                "SESSION_LIFETIME_SECS",
                &DEFAULT_SESSION_LIFETIME_SECS.to_string(),
            )?),
            http_timeout: Duration::from_secs(parsed(
                "HTTP_TIMEOUT_SECS",
                &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
            )?),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn optional(key: &'static str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<T>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
}
