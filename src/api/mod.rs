//! # API Module
//!
//! Route handlers for the browser.
//!
//! ## Endpoints
//!
//! ### Pages
//!
//! - [`home`] - Landing page with a login link or a greeting
//! - [`now_playing`] - Current track with playback controls
//! - [`now_playing_script`] - Polling script used by the now-playing page
//!
//! ### Authentication
//!
//! - [`login`] - Redirects to Spotify's consent page
//! - [`callback`] - Completes the authorization-code flow and creates the session
//! - [`logout`] - Drops the session
//!
//! ### Polling
//!
//! - [`now_playing_progress`] - JSON progress of the current track
//! - [`now_playing_track_info`] - HTML fragment describing the current track
//!
//! ### Playback
//!
//! - [`player_play`], [`player_pause`], [`player_next`], [`player_previous`] -
//!   Transport commands, answered with a status fragment
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version for monitoring
//!
//! Handlers that need Spotify go through [`crate::server::AppState::authorize`],
//! so an unknown session or a failed token refresh ends in a redirect to
//! `/login`.

mod auth;
mod health;
mod now_playing;
mod pages;
mod player;

pub use auth::{CallbackParams, STATE_COOKIE, STATE_MAX_AGE_SECS, callback, login, logout};
pub use health::health;
pub use now_playing::{now_playing, now_playing_progress, now_playing_track_info};
pub use pages::{home, now_playing_script};
pub use player::{player_next, player_pause, player_play, player_previous};
