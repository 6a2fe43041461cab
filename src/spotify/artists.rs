use crate::types::Artist;

use super::{SpotifyClient, SpotifyError};

impl SpotifyClient {
    /// Retrieves a single artist from the Spotify Web API.
    ///
    /// Uses `GET /artists/{id}`. Track listings only embed a simplified artist
    /// without genres, so this is the call that fills in the genre list for
    /// artists discovered through top tracks.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify ID of the artist
    ///
    /// # Example
    ///
    /// ```
    /// let artist = client.get_artist("4NHQUGzhtTLFvgF5SZesLK").await?;
    /// println!("{}: {}", artist.name, artist.genres.join(", "));
    /// ```
    pub async fn get_artist(&self, artist_id: &str) -> Result<Artist, SpotifyError> {
        self.get_json(&format!("/artists/{}", artist_id), &[]).await
    }
}
