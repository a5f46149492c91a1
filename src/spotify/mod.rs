//! # Spotify Integration Module
//!
//! Typed client for the parts of the Spotify Web API this app talks to:
//!
//! ```text
//! Route handlers
//!      ↓
//! SpotifyApi
//!     ├── auth    (authorize URL, code exchange, token refresh)
//!     ├── user    (GET /me)
//!     └── player  (GET /me/player, play/pause/next/previous)
//!      ↓
//! reqwest
//! ```
//!
//! A single [`SpotifyApi`] is built at startup and shared by every request.
//! It holds no per-user state; callers pass the access token of the session
//! they act for.
//!
//! ## Error handling
//!
//! - Authorization and read calls propagate non-2xx answers as
//!   [`AppError::Upstream`] so the user sees what went wrong.
//! - Playback commands report a plain `bool`; Spotify rejects them routinely
//!   (no active device, non-premium account) and the UI just shows that the
//!   command did not happen.

pub mod auth;
pub mod player;
pub mod user;

use reqwest::{Client, Response};

use crate::{config::Settings, error::AppError};

/// Shared Spotify Web API client.
pub struct SpotifyApi {
    client: Client,
    settings: Settings,
}

impl SpotifyApi {
    /// Builds the client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// [`AppError::Http`] when reqwest cannot set up its TLS backend.
    ///
    /// # Example
    ///
    /// ```
    /// let settings = Settings::from_env()?;
    /// let api = Arc::new(SpotifyApi::new(settings)?);
    /// ```
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{base}{path}",
            base = self.settings.api_url.trim_end_matches('/'),
            path = path
        )
    }
}

/// Turns a non-2xx response into [`AppError::Upstream`], keeping the body as
/// the message since Spotify explains most failures there.
async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(AppError::Upstream {
        status,
        message: if message.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            message
        },
    })
}
