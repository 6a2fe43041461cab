use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::{
    analysis::ranking::{TOP_GENRES_ARTIST_LIMIT, TOP_GENRES_LIMIT, rank_genres},
    server::AppState,
    spotify::bounded,
    types::{
        ArtistCard, RecencyWindow, TopArtistsView, TopGenresView, TopTracksView, TrackCard,
    },
    warning,
};

use super::{authorized, redirect_to_login, settle};

/// Entries shown on the top artists and top tracks pages.
pub const TOP_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

impl RangeQuery {
    /// Requested window; missing or unknown values fall back to the short one.
    pub fn window(&self) -> RecencyWindow {
        match self.range.as_deref() {
            None => RecencyWindow::default(),
            Some(range) => RecencyWindow::parse(range).unwrap_or_else(|| {
                warning!("Unknown time range '{}', using short_term", range);
                RecencyWindow::default()
            }),
        }
    }
}

pub async fn top_artists(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<RangeQuery>,
) -> Response {
    let Some((session_id, client)) = authorized(&state, &jar).await else {
        return redirect_to_login();
    };
    let window = query.window();

    let result = bounded(
        state.settings.http_timeout,
        client.get_top_artists(window, TOP_PAGE_LIMIT),
    )
    .await;
    let Some(artists) = settle(&state, &session_id, result, "top artists").await else {
        return redirect_to_login();
    };

    Json(TopArtistsView {
        artists: artists.iter().map(ArtistCard::from).collect(),
        time_range: window.to_string(),
    })
    .into_response()
}

pub async fn top_tracks(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<RangeQuery>,
) -> Response {
    let Some((session_id, client)) = authorized(&state, &jar).await else {
        return redirect_to_login();
    };
    let window = query.window();

    let result = bounded(
        state.settings.http_timeout,
        client.get_top_tracks(window, TOP_PAGE_LIMIT),
    )
    .await;
    let Some(tracks) = settle(&state, &session_id, result, "top tracks").await else {
        return redirect_to_login();
    };

    Json(TopTracksView {
        tracks: tracks.iter().map(TrackCard::from).collect(),
        time_range: window.to_string(),
    })
    .into_response()
}

pub async fn top_genres(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<RangeQuery>,
) -> Response {
    let Some((session_id, client)) = authorized(&state, &jar).await else {
        return redirect_to_login();
    };
    let window = query.window();

    let result = bounded(
        state.settings.http_timeout,
        client.get_top_artists(window, TOP_GENRES_ARTIST_LIMIT),
    )
    .await;
    let Some(artists) = settle(&state, &session_id, result, "top genres").await else {
        return redirect_to_login();
    };

    Json(TopGenresView {
        genres: rank_genres(&artists, TOP_GENRES_LIMIT),
        time_range: window.to_string(),
    })
    .into_response()
}
