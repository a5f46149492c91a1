//! nowplaying library
//!
//! A small web application that signs a user in with Spotify through the
//! OAuth 2.0 authorization-code flow, shows the track that is currently
//! playing and offers play/pause/next/previous controls.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers for the browser
//! - `config` - Configuration loading from environment variables and `.env` files
//! - `error` - Application error type and its HTTP mapping
//! - `management` - Token lifecycle management for authenticated sessions
//! - `server` - Router construction and the HTTP server loop
//! - `session` - Server-side session model and in-memory session store
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures for Spotify payloads and JSON responses
//! - `utils` - Random tokens, digests and HTML escaping
//! - `views` - HTML rendering of pages and fragments

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod views;

pub use error::AppError;

/// A convenient Result type alias for startup operations that may fail.
///
/// Request handling uses [`AppError`] instead so every failure maps onto a
/// concrete HTTP response.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures. Request handlers must never call it since
/// it terminates the whole server.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems such as a rejected playback command or an
/// upstream error that is turned into an error page.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
