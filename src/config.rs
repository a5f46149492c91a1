//! Configuration management for the nowplaying web app.
//!
//! Values come from environment variables, optionally seeded from `.env` files:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory
//! 4. Application defaults (where applicable)
//!
//! Everything is read once into [`Settings`] at startup and handed to the
//! components that need it.

use std::{env, path::PathBuf, time::Duration};

use crate::error::AppError;

pub const DEFAULT_SCOPE: &str =
    "user-read-currently-playing user-read-playback-state user-modify-playback-state";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// The working directory file is loaded first so a project-local `.env` wins
/// over the one in the local data directory (`dotenv` never overrides values
/// that are already set). The data directory is created when missing so the
/// user has an obvious place to drop their configuration:
///
/// - Linux: `~/.local/share/nowplaying/.env`
/// - macOS: `~/Library/Application Support/nowplaying/.env`
/// - Windows: `%LOCALAPPDATA%/nowplaying/.env`
///
/// Missing files are not an error; a malformed file is.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("nowplaying/.env");
    path
}

/// Runtime settings for the server and the Spotify client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    /// Idle lifetime of a server-side session.
    pub session_ttl: Duration,
    /// Upper bound for a single request to Spotify.
    pub http_timeout: Duration,
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID`, `SPOTIFY_API_AUTH_CLIENT_SECRET` and
    /// `SPOTIFY_API_REDIRECT_URI` are required; everything else falls back to
    /// Spotify's public endpoints and local defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            server_addr: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            session_ttl: seconds("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            http_timeout: seconds("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
        })
    }

    /// Whether cookies must carry the `Secure` attribute.
    ///
    /// Follows the redirect URI: a deployment reachable over https gets secure
    /// cookies, a plain `http://127.0.0.1` setup keeps working without TLS.
    pub fn secure_cookies(&self) -> bool {
        self.redirect_uri.starts_with("https://")
    }
}

fn required(key: &str) -> Result<String, AppError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!("{} must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn seconds(key: &str, default: u64) -> Result<Duration, AppError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| AppError::Config(format!("{} is not a number of seconds: {}", key, e))),
        _ => Ok(Duration::from_secs(default)),
    }
}
