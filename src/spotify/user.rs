use crate::{error::AppError, types::UserProfile};

use super::{SpotifyApi, ensure_success};

impl SpotifyApi {
    /// Fetches the profile of the user owning `token`.
    ///
    /// # Errors
    ///
    /// [`AppError::Upstream`] for non-2xx answers (401 for a dead token),
    /// [`AppError::Http`] for transport or decoding failures.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, AppError> {
        let response = self
            .client
            .get(self.api_url("/me"))
            .bearer_auth(token)
            .send()
            .await?;

        let profile = ensure_success(response).await?.json::<UserProfile>().await?;
        Ok(profile)
    }
}
