use std::sync::Arc;

use chrono::Utc;

use crate::{error::AppError, info, session::Session, spotify::SpotifyApi};

/// Hands out valid access tokens for sessions, refreshing them when they are
/// about to expire.
#[derive(Clone)]
pub struct TokenManager {
    api: Arc<SpotifyApi>,
}

impl TokenManager {
    pub fn new(api: Arc<SpotifyApi>) -> Self {
        TokenManager { api }
    }

    /// Returns an access token for `session` that is good for at least the
    /// refresh margin.
    ///
    /// The session is updated in place when a refresh happens; the caller is
    /// responsible for writing it back to the store.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthenticated`] when there is no session
    /// - [`AppError::MissingRefreshToken`] when a refresh is due but the
    ///   session never received a refresh token
    /// - [`AppError::UpstreamAuth`] when Spotify refuses the refresh
    pub async fn get_valid_access_token(
        &self,
        session: Option<&mut Session>,
    ) -> Result<String, AppError> {
        let session = session.ok_or(AppError::Unauthenticated)?;

        if session.needs_refresh(Utc::now()) {
            self.refresh(session).await?;
        }

        Ok(session.access_token().to_string())
    }

    async fn refresh(&self, session: &mut Session) -> Result<(), AppError> {
        let refresh_token = session
            .refresh_token()
            .ok_or(AppError::MissingRefreshToken)?
            .to_string();

        let tokens = self.api.refresh_token(&refresh_token).await?;
        session
            .apply_refresh(tokens, Utc::now())
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        info!("Refreshed access token for {}", session.user_id());
        Ok(())
    }
}
