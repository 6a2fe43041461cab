use crate::types::UserProfile;

use super::{SpotifyClient, SpotifyError};

impl SpotifyClient {
    /// Retrieves the profile of the user the access token belongs to.
    pub async fn get_current_user(&self) -> Result<UserProfile, SpotifyError> {
        self.get_json("/me", &[]).await
    }
}
