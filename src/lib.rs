//! Spotify Listener Rating Web App Library
//!
//! This library provides everything behind the `spotirate` web server: the
//! Spotify OAuth session gate, a thin Spotify Web API client, and the genre
//! analysis that turns a user's listening history into a genre radar and a
//! letter-grade listener rating.
//!
//! # Modules
//!
//! - `analysis` - Genre classification, aggregation, radar and grading
//! - `api` - HTTP handlers for the web server
//! - `config` - Configuration management and environment variables
//! - `management` - Session and token management
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotirate::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotirate::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     server::start_api_server(settings).await
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result type for start-up and server-loop code.
///
/// Request handlers do not use it; they settle every failure into a response.
/// Configuration, binding and serving errors all end up here and are reported
/// once by the binary.
///
/// # Example
///
/// ```
/// use spotirate::{Res, config::Settings, server};
///
/// async fn run(settings: Settings) -> Res<()> {
///     server::start_api_server(settings).await
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Logs a status line prefixed with a blue `o`.
///
/// Takes `println!`-style arguments.
///
/// # Example
///
/// ```
/// info!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Logs a completed step (login, token refresh) prefixed with a green `✓`.
///
/// ```
/// success!("Access token refreshed");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Logs a fatal start-up problem prefixed with a red `!` and exits with
/// status 1.
///
/// Only the binary uses this, for problems such as a missing
/// `SESSION_SECRET` or an address that cannot be bound. A running server never
/// exits because of a single request.
///
/// ```
/// error!("Invalid configuration. Err: {}", e);
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Logs a recoverable problem prefixed with a yellow `!`.
///
/// Used wherever an upstream failure is swallowed: a skipped recency window,
/// a failed artist lookup, a rejected token.
///
/// ```
/// warning!("Artist lookup for {} failed, skipping: {}", id, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
