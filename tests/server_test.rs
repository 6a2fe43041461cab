mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use spotirate::{
    management::SESSION_COOKIE_NAME,
    server::{AppState, router},
};
use tower::ServiceExt;

use common::{offline_settings, spawn_mock_spotify, spawn_rejecting_spotify, test_settings};

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` pair of the session cookie set by `response`.
fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(SESSION_COOKIE_NAME) && !pair.ends_with('='))
        .unwrap()
        .to_string()
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Runs login and callback against `base_url`, returns app, state and cookie.
async fn logged_in(base_url: &str) -> (Router, AppState, String) {
    let state = AppState::new(test_settings(base_url)).unwrap();
    let app = router(state.clone());

    let response = get(&app, "/login", None).await;
    let cookie = session_cookie(&response);

    let response = get(&app, "/callback?code=test-code", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/menu");

    (app, state, cookie)
}

#[tokio::test]
async fn test_health() {
    let app = router(AppState::new(offline_settings()).unwrap());

    let response = get(&app, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "spotirate");
    assert_eq!(body["sessions"], 0);
}

#[tokio::test]
async fn test_home_renders_landing_page() {
    let app = router(AppState::new(offline_settings()).unwrap());

    let response = get(&app, "/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/login"));
}

#[tokio::test]
async fn test_protected_pages_redirect_without_session() {
    let app = router(AppState::new(offline_settings()).unwrap());

    for uri in ["/menu", "/top-artists", "/top-tracks?range=long_term", "/top-genres"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), "/login", "{}", uri);
    }
}

#[tokio::test]
async fn test_forged_cookie_is_ignored() {
    let state = AppState::new(offline_settings()).unwrap();
    let app = router(state.clone());
    let (id, _) = state.sessions.begin_login().await;

    let forged = format!("{}={}", SESSION_COOKIE_NAME, id);
    let response = get(&app, "/menu", Some(&forged)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_redirects_to_spotify() {
    let state = AppState::new(offline_settings()).unwrap();
    let app = router(state.clone());

    let response = get(&app, "/login", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("http://127.0.0.1:1/authorize?"));
    assert!(target.contains("client_id=test-client"));
    assert!(target.contains("code_challenge_method=S256"));
    assert!(target.contains("show_dialog=true"));
    assert!(session_cookie(&response).starts_with("spotify_session="));
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_callback_rejects_incomplete_requests() {
    let app = router(AppState::new(offline_settings()).unwrap());

    let response = get(&app, "/callback", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, "/callback?error=access_denied", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // code but no login in progress
    let response = get(&app, "/callback?code=abc", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_fails_when_exchange_fails() {
    let app = router(AppState::new(offline_settings()).unwrap());
    let response = get(&app, "/login", None).await;
    let cookie = session_cookie(&response);

    let response = get(&app, "/callback?code=abc", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // the verifier was used up by the first attempt
    let response = get(&app, "/callback?code=abc", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_menu_after_login() {
    let base_url = spawn_mock_spotify().await;
    let (app, _, cookie) = logged_in(&base_url).await;

    let response = get(&app, "/menu", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["display_name"], "Test Listener");
    assert_eq!(body["profile_pic"], "https://img.example/me.png");
    assert_eq!(
        body["radar_labels"],
        serde_json::json!(["Pop", "Jazz/Blues", "Rock", "Indie/Alt", "Latin"])
    );
    assert_eq!(body["radar_values"][0], 100.0);
    assert_ne!(
        body["rating_description"],
        spotirate::analysis::grade::INSUFFICIENT_DATA_DESCRIPTION
    );
    assert!(body["listener_score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_top_pages_after_login() {
    let base_url = spawn_mock_spotify().await;
    let (app, _, cookie) = logged_in(&base_url).await;

    let response = get(&app, "/top-artists", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["time_range"], "short_term");
    assert_eq!(body["artists"][0]["name"], "Rocker");
    assert_eq!(body["artists"][0]["image"], "https://img.example/a1.png");

    let response = get(&app, "/top-tracks?range=nonsense", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["time_range"], "short_term");
    assert_eq!(body["tracks"][0]["artist"], "Rocker");
    assert_eq!(body["tracks"].as_array().unwrap().len(), 2);

    let response = get(&app, "/top-genres?range=medium_term", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["time_range"], "medium_term");
    assert_eq!(body["genres"][0]["name"], "jazz");
    assert_eq!(body["genres"][0]["icon"], "🎷");
}

#[tokio::test]
async fn test_rejected_token_sends_user_to_login() {
    let base_url = spawn_rejecting_spotify().await;
    let (app, state, cookie) = logged_in(&base_url).await;
    assert_eq!(state.sessions.len().await, 1);

    let response = get(&app, "/menu", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn test_logout_forgets_session() {
    let base_url = spawn_mock_spotify().await;
    let (app, state, cookie) = logged_in(&base_url).await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.sessions.is_empty().await);

    let response = get(&app, "/menu", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
