use crate::types::{Artist, Paging, RecencyWindow, Track};

use super::{SpotifyClient, SpotifyError};

/// Largest page the top items endpoints accept.
pub const MAX_TOP_LIMIT: u32 = 50;

impl SpotifyClient {
    /// Retrieves the current user's top artists for a time range.
    ///
    /// Uses `GET /me/top/artists` with `time_range` set from `window`.
    /// `limit` is clamped to the 1-50 range the endpoint accepts.
    ///
    /// # Example
    ///
    /// ```
    /// let artists = client.get_top_artists(RecencyWindow::Long, 50).await?;
    /// println!("{} top artists", artists.len());
    /// ```
    pub async fn get_top_artists(
        &self,
        window: RecencyWindow,
        limit: u32,
    ) -> Result<Vec<Artist>, SpotifyError> {
        let page: Paging<Artist> = self
            .get_json("/me/top/artists", &top_query(window, limit))
            .await?;
        Ok(page.items)
    }

    /// Retrieves the current user's top tracks for a time range.
    ///
    /// Uses `GET /me/top/tracks`; same limits as [`SpotifyClient::get_top_artists`].
    pub async fn get_top_tracks(
        &self,
        window: RecencyWindow,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let page: Paging<Track> = self
            .get_json("/me/top/tracks", &top_query(window, limit))
            .await?;
        Ok(page.items)
    }
}

fn top_query(window: RecencyWindow, limit: u32) -> [(&'static str, String); 2] {
    [
        ("limit", limit.clamp(1, MAX_TOP_LIMIT).to_string()),
        ("time_range", window.as_str().to_string()),
    ]
}
