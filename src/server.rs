use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use reqwest::Client;
use sha2::{Digest, Sha512};

use crate::{Res, api, config::Settings, info, management::SessionManager};

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: SessionManager,
    pub http: Client,
    key: Key,
}

impl AppState {
    /// Builds the state from start-up settings.
    ///
    /// The cookie signing key is derived from the configured session secret and
    /// is therefore stable across restarts.
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(settings.http_timeout).build()?;
        let key = Key::from(Sha512::digest(settings.session_secret.as_bytes()).as_slice());
        let settings = Arc::new(settings);

        Ok(Self {
            sessions: SessionManager::new(http.clone(), Arc::clone(&settings)),
            settings,
            http,
            key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/menu", get(api::menu))
        .route("/top-artists", get(api::top_artists))
        .route("/top-tracks", get(api::top_tracks))
        .route("/top-genres", get(api::top_genres))
        .route("/logout", get(api::logout))
        .route("/health", get(api::health))
        .with_state(state)
}

pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = settings.server_addr;
    let app = router(AppState::new(settings)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
