use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::{
    analysis::{self, radar::DEFAULT_TOP_K},
    management::DEFAULT_DISPLAY_NAME,
    server::AppState,
    spotify::bounded,
    types::MenuView,
    warning,
};

use super::{authorized, redirect_to_login};

/// Profile summary with genre radar and listener rating.
pub async fn menu(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let Some((session_id, client)) = authorized(&state, &jar).await else {
        return redirect_to_login();
    };

    let timeout = state.settings.http_timeout;
    match bounded(timeout, client.get_current_user()).await {
        Ok(profile) => state.sessions.store_profile(&session_id, &profile).await,
        Err(e) if e.is_unauthorized() => {
            state.sessions.invalidate(&session_id).await;
            return redirect_to_login();
        }
        Err(e) => warning!("Profile lookup failed, using cached profile: {}", e),
    }

    let cached = state.sessions.session(&session_id).await.unwrap_or_default();
    let display_name = cached
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

    let (counts, unique_artists) = analysis::collect(&client, timeout).await;
    let radar = analysis::build_radar(&counts, DEFAULT_TOP_K);
    let rating = analysis::grade(&counts, unique_artists);

    Json(MenuView {
        display_name,
        profile_pic: cached.profile_pic,
        radar_labels: radar.labels,
        radar_values: radar.values,
        listener_grade: rating.grade.to_string(),
        listener_score: (rating.score * 10.0).round() / 10.0,
        rating_description: rating.description.to_string(),
    })
    .into_response()
}
