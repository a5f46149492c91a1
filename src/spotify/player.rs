use reqwest::{Method, StatusCode, header::CONTENT_LENGTH};

use crate::{error::AppError, types::CurrentPlayback, warning};

use super::{SpotifyApi, ensure_success};

/// Transport commands sent to the user's active device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Next,
    Previous,
}

impl PlayerCommand {
    fn method(self) -> Method {
        match self {
            PlayerCommand::Play | PlayerCommand::Pause => Method::PUT,
            PlayerCommand::Next | PlayerCommand::Previous => Method::POST,
        }
    }

    fn path(self) -> &'static str {
        match self {
            PlayerCommand::Play => "/me/player/play",
            PlayerCommand::Pause => "/me/player/pause",
            PlayerCommand::Next => "/me/player/next",
            PlayerCommand::Previous => "/me/player/previous",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerCommand::Play => "play",
            PlayerCommand::Pause => "pause",
            PlayerCommand::Next => "next",
            PlayerCommand::Previous => "previous",
        }
    }
}

/// Statuses Spotify uses to acknowledge a playback command.
pub fn is_accepted(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT
    )
}

impl SpotifyApi {
    /// Fetches the user's playback state.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token of the session
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing is playing: Spotify answers `204 No Content`
    /// (or an empty body) in that case, which is not an error. A payload
    /// without an item (ads) is returned as is; see
    /// [`CurrentPlayback::snapshot`].
    ///
    /// # Errors
    ///
    /// - [`AppError::Upstream`] for non-2xx answers and malformed payloads
    /// - [`AppError::Http`] for transport failures
    pub async fn current_playback(
        &self,
        token: &str,
    ) -> Result<Option<CurrentPlayback>, AppError> {
        let response = self
            .client
            .get(self.api_url("/me/player"))
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = ensure_success(response).await?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<CurrentPlayback>(&body)
            .map(Some)
            .map_err(|e| AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                message: format!("unexpected playback payload: {}", e),
            })
    }

    /// Resumes playback on the active device.
    pub async fn play(&self, token: &str) -> bool {
        self.control(token, PlayerCommand::Play).await
    }

    /// Pauses playback on the active device.
    pub async fn pause(&self, token: &str) -> bool {
        self.control(token, PlayerCommand::Pause).await
    }

    /// Skips to the next track.
    pub async fn next(&self, token: &str) -> bool {
        self.control(token, PlayerCommand::Next).await
    }

    /// Skips to the previous track.
    pub async fn previous(&self, token: &str) -> bool {
        self.control(token, PlayerCommand::Previous).await
    }

    /// Sends a playback command and reports whether Spotify accepted it.
    ///
    /// Never fails: rejected commands and transport errors are logged and
    /// reported as `false`. Only 200, 202 and 204 count as accepted.
    ///
    /// # Example
    ///
    /// ```
    /// if !api.control(&token, PlayerCommand::Next).await {
    ///     warning!("skip did not happen");
    /// }
    /// ```
    pub async fn control(&self, token: &str, command: PlayerCommand) -> bool {
        let result = self
            .client
            .request(command.method(), self.api_url(command.path()))
            .bearer_auth(token)
            // Spotify answers 411 to bodiless PUT/POST without a length
            .header(CONTENT_LENGTH, "0")
            .send()
            .await;

        match result {
            Ok(response) if is_accepted(response.status()) => true,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warning!(
                    "Spotify rejected {} command with {}: {}",
                    command.name(),
                    status,
                    body
                );
                false
            }
            Err(e) => {
                warning!("Failed to send {} command: {}", command.name(), e);
                false
            }
        }
    }
}
