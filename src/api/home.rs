use axum::{extract::State, response::Html};
use axum_extra::extract::SignedCookieJar;

use crate::server::AppState;

use super::clear_session;

const LANDING_PAGE: &str = "<h2>Spotify Listener Rating</h2>\
<p>See your genre radar and find out what kind of listener you are.</p>\
<a href='/login'>Log in with Spotify</a>";

const LOGGED_OUT_PAGE: &str = "<p>You have been logged out.</p><a href='/'>Log in again</a>";

pub async fn home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Html<&'static str>) {
    let jar = clear_session(&state, jar).await;
    (jar, Html(LANDING_PAGE))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Html<&'static str>) {
    let jar = clear_session(&state, jar).await;
    (jar, Html(LOGGED_OUT_PAGE))
}
