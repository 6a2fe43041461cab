use std::{collections::HashMap, sync::Arc, time::Duration};

use axum_extra::extract::cookie::{Cookie, SameSite};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    spotify::SpotifyClient,
    success,
    types::{Token, UserProfile},
    utils, warning,
};

use super::TokenManager;

pub const SESSION_COOKIE_NAME: &str = "spotify_session";
pub const DEFAULT_DISPLAY_NAME: &str = "Spotify User";

/// Everything remembered about one browser between requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: Option<Token>,
    pub code_verifier: Option<String>,
    pub display_name: Option<String>,
    pub profile_pic: Option<String>,
    created_at: u64,
}

/// In-memory credential cache keyed by the session cookie.
///
/// This is the only state that survives between requests. Handlers ask it for a
/// [`SpotifyClient`] and treat `None` as "send the user to the login page";
/// they never look at the token itself.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    http: Client,
    settings: Arc<Settings>,
}

impl SessionManager {
    pub fn new(http: Client, settings: Arc<Settings>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            http,
            settings,
        }
    }

    /// Starts a fresh session holding a new PKCE code verifier.
    ///
    /// Returns the session id and the verifier. Stale sessions are pruned on
    /// the way.
    pub async fn begin_login(&self) -> (String, String) {
        let session_id = utils::generate_session_id();
        let code_verifier = utils::generate_code_verifier();
        let now = utils::now_secs();

        let mut sessions = self.sessions.lock().await;
        let lifetime = self.settings.session_lifetime;
        sessions.retain(|_, s| !is_stale(s, now, lifetime));
        sessions.insert(
            session_id.clone(),
            Session {
                code_verifier: Some(code_verifier.clone()),
                created_at: now,
                ..Session::default()
            },
        );

        (session_id, code_verifier)
    }

    /// Removes and returns the PKCE verifier of a pending login.
    pub async fn take_code_verifier(&self, session_id: &str) -> Option<String> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .get_mut(session_id)
            .and_then(|s| s.code_verifier.take())
    }

    /// Caches the credential for a session. Returns `false` if the session is
    /// unknown.
    pub async fn store_token(&self, session_id: &str, token: Token) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.token = Some(token);
                true
            }
            None => false,
        }
    }

    pub async fn store_profile(&self, session_id: &str, profile: &UserProfile) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.display_name = profile.display_name.clone();
            session.profile_pic = profile.images.first().map(|i| i.url.clone());
        }
    }

    /// Returns a copy of the session, if it exists and has not expired.
    pub async fn session(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .filter(|s| !is_stale(s, utils::now_secs(), self.settings.session_lifetime))
            .cloned()
    }

    /// Returns a client for the session's user, or `None` if the user has to
    /// log in again.
    ///
    /// A token that is about to expire is refreshed first. A failed refresh
    /// invalidates the session.
    pub async fn get_session_client(&self, session_id: &str) -> Option<SpotifyClient> {
        let token = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get(session_id)?;
            if is_stale(session, utils::now_secs(), self.settings.session_lifetime) {
                sessions.remove(session_id);
                return None;
            }
            session.token.clone()?
        };

        let mut manager = TokenManager::new(token);
        let was_expired = manager.is_expired();
        let access_token = match manager.get_valid_token(&self.http, &self.settings).await {
            Ok(access_token) => access_token,
            Err(e) => {
                warning!("Token refresh failed, session needs a new login: {}", e);
                self.invalidate(session_id).await;
                return None;
            }
        };

        if was_expired {
            self.store_token(session_id, manager.into_token()).await;
            success!("Access token refreshed");
        }

        Some(SpotifyClient::new(
            self.http.clone(),
            self.settings.api_url.as_str(),
            access_token,
        ))
    }

    /// Drops the session and its cached credential.
    pub async fn invalidate(&self, session_id: &str) {
        self.sessions.lock().await.remove(session_id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn is_stale(session: &Session, now: u64, lifetime: Duration) -> bool {
    now >= session.created_at.saturating_add(lifetime.as_secs())
}

/// Session cookie carrying `session_id`; signed by the cookie jar.
///
/// Browser-session scoped; expiry is enforced on the server side.
pub fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie used to remove the session cookie from the browser.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build()
}
