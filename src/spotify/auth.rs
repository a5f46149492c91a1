use reqwest::Url;

use crate::{error::AppError, types::TokenResponse};

use super::{SpotifyApi, ensure_success};

impl SpotifyApi {
    /// Builds the URL of Spotify's consent page.
    ///
    /// `show_dialog=true` makes Spotify ask again after a logout instead of
    /// silently reusing the previous grant.
    ///
    /// # Arguments
    ///
    /// * `state` - Random value echoed back on the callback; the callback must
    ///   compare it with the copy kept in the browser's state cookie
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when `SPOTIFY_AUTH_URL` is not a valid URL.
    ///
    /// # Example
    ///
    /// ```
    /// let oauth_state = utils::generate_token(32);
    /// let url = api.authorize_url(&oauth_state)?;
    /// // https://accounts.spotify.com/authorize?client_id=...&state=...
    /// ```
    pub fn authorize_url(&self, state: &str) -> Result<String, AppError> {
        let settings = &self.settings;
        let url = Url::parse_with_params(
            &settings.auth_url,
            &[
                ("client_id", settings.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", settings.redirect_uri.as_str()),
                ("scope", settings.scope.as_str()),
                ("state", state),
                ("show_dialog", "true"),
            ],
        )
        .map_err(|e| AppError::Config(format!("invalid authorize URL: {}", e)))?;

        Ok(url.into())
    }

    /// Exchanges the authorization code from the callback for a token pair.
    ///
    /// # Arguments
    ///
    /// * `code` - The `code` query parameter Spotify appended to the callback
    ///
    /// # Errors
    ///
    /// - [`AppError::Upstream`] when the token endpoint answers non-2xx, e.g.
    ///   an expired or already used code
    /// - [`AppError::Http`] on transport errors or an unparsable body
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let settings = &self.settings;
        let response = self
            .client
            .post(&settings.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", settings.redirect_uri.as_str()),
                ("client_id", settings.client_id.as_str()),
                ("client_secret", settings.client_secret.as_str()),
            ])
            .send()
            .await?;

        let tokens = ensure_success(response).await?.json::<TokenResponse>().await?;
        Ok(tokens)
    }

    /// Trades a refresh token for a new access token.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - Refresh token stored in the session
    ///
    /// # Returns
    ///
    /// The new token response. `refresh_token` is usually absent, meaning the
    /// old one stays valid.
    ///
    /// # Errors
    ///
    /// Every failure, including transport errors, comes back as
    /// [`AppError::UpstreamAuth`]: the caller cannot do anything but start a
    /// new login.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let settings = &self.settings;
        let response = self
            .client
            .post(&settings.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", settings.client_id.as_str()),
                ("client_secret", settings.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamAuth(format!("{}: {}", status, body)));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))
    }
}
