use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::{
    management::session_cookie,
    server::AppState,
    spotify::{self, SpotifyClient},
    success, utils, warning,
};

use super::{clear_session, session_id};

pub const MENU_PATH: &str = "/menu";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Starts a new login: fresh session, PKCE verifier, redirect to Spotify.
pub async fn login(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let jar = clear_session(&state, jar).await;
    let (session_id, verifier) = state.sessions.begin_login().await;
    let challenge = utils::generate_code_challenge(&verifier);

    match spotify::auth::authorize_url(&state.settings, &challenge) {
        Ok(url) => (jar.add(session_cookie(session_id)), Redirect::to(&url)).into_response(),
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            state.sessions.invalidate(&session_id).await;
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                jar,
                Html("<h4>Login is not available right now.</h4>"),
            )
                .into_response()
        }
    }
}

/// Completes the login started by [`login`].
pub async fn callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error.as_deref() {
        warning!("Spotify denied the authorization: {}", error);
        return login_failed("<h4>Login failed.</h4>");
    }

    let Some(code) = params.code.as_deref() else {
        return login_failed("<h4>Missing authorization code.</h4>");
    };
    let Some(session_id) = session_id(&jar) else {
        return login_failed("<h4>Missing session.</h4>");
    };
    let Some(verifier) = state.sessions.take_code_verifier(&session_id).await else {
        return login_failed("<h4>Missing PKCE code verifier.</h4>");
    };

    let token = match spotify::auth::exchange_code_pkce(&state.http, &state.settings, code, &verifier)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return login_failed("<h4>Login failed.</h4>");
        }
    };

    let client = SpotifyClient::new(
        state.http.clone(),
        state.settings.api_url.as_str(),
        token.access_token.as_str(),
    );
    if !state.sessions.store_token(&session_id, token).await {
        return login_failed("<h4>Session expired, please log in again.</h4>");
    }

    match client.get_current_user().await {
        Ok(profile) => state.sessions.store_profile(&session_id, &profile).await,
        Err(e) => warning!("Profile lookup after login failed: {}", e),
    }

    success!("Authentication successful!");
    Redirect::to(MENU_PATH).into_response()
}

fn login_failed(message: &'static str) -> Response {
    (StatusCode::BAD_REQUEST, Html(message)).into_response()
}
