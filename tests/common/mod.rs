#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use spotirate::{
    config::Settings,
    types::{Album, Artist, Token, Track, TrackArtist},
    utils,
};

pub const SECRET: &str = "a-test-session-secret-that-is-long-enough";

pub fn test_settings(base_url: &str) -> Settings {
    Settings {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        client_id: "test-client".to_string(),
        redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
        scope: "user-top-read".to_string(),
        auth_url: format!("{}/authorize", base_url),
        token_url: format!("{}/api/token", base_url),
        api_url: format!("{}/v1", base_url),
        session_secret: SECRET.to_string(),
        session_lifetime: Duration::from_secs(3600),
        http_timeout: Duration::from_secs(5),
    }
}

/// Settings whose Spotify endpoints point at a closed local port.
pub fn offline_settings() -> Settings {
    test_settings("http://127.0.0.1:1")
}

pub fn artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        images: Vec::new(),
    }
}

pub fn track(name: &str, artist_ids: &[&str]) -> Track {
    Track {
        id: Some(format!("{}-id", name)),
        name: name.to_string(),
        artists: artist_ids
            .iter()
            .map(|id| TrackArtist {
                id: Some(id.to_string()),
                name: format!("Artist {}", id),
            })
            .collect(),
        album: Album::default(),
    }
}

pub fn fresh_token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: "refresh-me".to_string(),
        scope: "user-top-read".to_string(),
        expires_in: 3600,
        obtained_at: utils::now_secs(),
    }
}

pub fn expired_token(access_token: &str) -> Token {
    Token {
        obtained_at: 0,
        ..fresh_token(access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TopQuery {
    time_range: Option<String>,
}

async fn token() -> Json<serde_json::Value> {
    Json(json!({
        "access_token": "mock-access",
        "refresh_token": "mock-refresh",
        "scope": "user-top-read",
        "expires_in": 3600
    }))
}

async fn me() -> Json<serde_json::Value> {
    Json(json!({
        "id": "tester",
        "display_name": "Test Listener",
        "images": [{ "url": "https://img.example/me.png", "height": 64, "width": 64 }]
    }))
}

async fn top_artists(Query(q): Query<TopQuery>) -> Json<serde_json::Value> {
    let items = match q.time_range.as_deref() {
        Some("short_term") => json!([
            { "id": "a1", "name": "Rocker", "genres": ["rock", "indie rock"], "images": [{ "url": "https://img.example/a1.png" }] },
            { "id": "a2", "name": "Popper", "genres": ["pop", "dance pop"], "images": [] }
        ]),
        Some("medium_term") => json!([
            { "id": "a3", "name": "Jazzer", "genres": ["jazz", "bebop"], "images": [] }
        ]),
        _ => json!([]),
    };
    Json(json!({ "items": items, "total": 3 }))
}

async fn top_tracks(Query(q): Query<TopQuery>) -> Json<serde_json::Value> {
    let items = match q.time_range.as_deref() {
        Some("short_term") => json!([
            {
                "id": "t1",
                "name": "Song One",
                "artists": [{ "id": "a1", "name": "Rocker" }, { "id": "b1", "name": "Guest" }],
                "album": { "images": [{ "url": "https://img.example/t1.png" }] }
            },
            {
                "id": "t2",
                "name": "Song Two",
                "artists": [{ "id": "broken", "name": "Broken" }, { "id": null, "name": "Local" }],
                "album": { "images": [] }
            }
        ]),
        _ => json!([]),
    };
    Json(json!({ "items": items, "total": 2 }))
}

async fn artist_by_id(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "b1" => Json(json!({ "id": "b1", "name": "Guest", "genres": ["reggaeton"], "images": [] }))
            .into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Starts a fake Spotify (accounts + Web API) on a random local port.
pub async fn spawn_mock_spotify() -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(me))
        .route("/v1/me/top/artists", get(top_artists))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/v1/artists/{id}", get(artist_by_id));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn rate_limited_top_tracks() -> Json<serde_json::Value> {
    Json(json!({
        "items": [{
            "id": "t9",
            "name": "Crowded Song",
            "artists": [
                { "id": "c1", "name": "One" },
                { "id": "c2", "name": "Two" },
                { "id": "c3", "name": "Three" }
            ],
            "album": { "images": [] }
        }],
        "total": 1
    }))
}

/// Mock Spotify whose artist endpoint always answers `429` with
/// `Retry-After: 2`. Top artists are empty, the top tracks of every window
/// feature three new artists.
pub async fn spawn_rate_limited_spotify() -> String {
    let app = Router::new()
        .route(
            "/v1/me/top/artists",
            get(|| async { Json(json!({ "items": [], "total": 0 })) }),
        )
        .route("/v1/me/top/tracks", get(rate_limited_top_tracks))
        .route(
            "/v1/artists/{id}",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "2")]) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Mock Spotify that rejects every access token.
pub async fn spawn_rejecting_spotify() -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(|| async { StatusCode::UNAUTHORIZED }))
        .route("/v1/me/top/artists", get(|| async { StatusCode::UNAUTHORIZED }))
        .route("/v1/me/top/tracks", get(|| async { StatusCode::UNAUTHORIZED }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
