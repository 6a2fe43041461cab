//! # API Module
//!
//! HTTP handlers of the spotirate web server.
//!
//! ## Endpoints
//!
//! ### Public
//!
//! - [`home`] - Landing page; clears any previous session
//! - [`login`] - Starts the Spotify OAuth 2.0 PKCE flow
//! - [`callback`] - Completes the flow and caches the credential
//! - [`logout`] - Forgets the session
//! - [`health`] - Status and version for monitoring
//!
//! ### Protected
//!
//! - [`menu`] - Profile, genre radar and listener rating
//! - [`top_artists`], [`top_tracks`], [`top_genres`] - Top lists for a time
//!   range given as `?range=short_term|medium_term|long_term`
//!
//! Protected endpoints never answer with an error page when the user is not
//! logged in: without a usable credential they redirect to `/login`. The same
//! happens when Spotify rejects the cached token mid-request. Other upstream
//! failures degrade to an empty result and are only logged.
//!
//! ## Sessions
//!
//! The browser only holds a signed `spotify_session` cookie with an opaque id.
//! Tokens stay on the server in the [`SessionManager`](crate::management::SessionManager).

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;

use crate::{
    management::{SESSION_COOKIE_NAME, removal_cookie},
    server::AppState,
    spotify::{SpotifyClient, SpotifyError},
    warning,
};

mod auth;
mod health;
mod home;
mod menu;
mod top;

pub use auth::{callback, login};
pub use health::health;
pub use home::{home, logout};
pub use menu::menu;
pub use top::{top_artists, top_genres, top_tracks};

pub const LOGIN_PATH: &str = "/login";

fn session_id(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|id| !id.is_empty())
}

/// Resolves the session cookie to a usable Spotify client.
async fn authorized(state: &AppState, jar: &SignedCookieJar) -> Option<(String, SpotifyClient)> {
    let session_id = session_id(jar)?;
    let client = state.sessions.get_session_client(&session_id).await?;
    Some((session_id, client))
}

fn redirect_to_login() -> Response {
    Redirect::to(LOGIN_PATH).into_response()
}

/// Forgets the current session, server side and in the browser.
async fn clear_session(state: &AppState, jar: SignedCookieJar) -> SignedCookieJar {
    if let Some(id) = session_id(&jar) {
        state.sessions.invalidate(&id).await;
    }
    jar.remove(removal_cookie())
}

/// Settles the result of a page's primary Spotify call.
///
/// Returns `None` when the token was rejected; the session is dropped and the
/// caller should redirect to the login page. Any other failure is logged and
/// replaced by the default value.
async fn settle<T: Default>(
    state: &AppState,
    session_id: &str,
    result: Result<T, SpotifyError>,
    what: &str,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(SpotifyError::Unauthorized) => {
            warning!("Spotify rejected the session token while fetching {}", what);
            state.sessions.invalidate(session_id).await;
            None
        }
        Err(e) => {
            warning!("Failed to fetch {}, showing empty result: {}", what, e);
            Some(T::default())
        }
    }
}
