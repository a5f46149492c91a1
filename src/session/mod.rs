//! Server-side sessions.
//!
//! A [`Session`] holds the Spotify tokens and profile fields of one signed-in
//! browser. The browser only ever sees an opaque id in a cookie; the
//! [`SessionStore`] maps that id onto the session.

mod store;

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::AppError,
    types::{TokenResponse, UserProfile},
};

pub use store::SessionStore;

/// Name of the cookie carrying the opaque session id.
pub const SESSION_COOKIE: &str = "nowplaying_session";

/// Refresh this long before the access token actually expires, to absorb clock
/// skew and the latency of the request that is about to use it.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint does not send `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// OAuth state of one signed-in browser.
///
/// Fields are private so every mutation goes through [`Session::establish`]
/// or [`Session::apply_refresh`], which both validate the token response.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user_id: String,
    display_name: String,
    access_token: String,
    refresh_token: Option<String>,
    token_expiry: DateTime<Utc>,
}

impl Session {
    /// Creates the session for a freshly completed login.
    ///
    /// # Arguments
    ///
    /// * `profile` - Spotify profile of the user who just logged in
    /// * `tokens` - Token pair returned by the authorization-code exchange
    /// * `now` - Reference time the relative `expires_in` is added to
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidToken`] when the access token is empty or the
    /// lifetime is not a positive number of seconds that fits a timestamp. An
    /// authenticated session therefore always has a token and a future expiry.
    ///
    /// # Example
    ///
    /// ```
    /// let tokens = api.exchange_code(&code).await?;
    /// let profile = api.current_user(&tokens.access_token).await?;
    /// let session = Session::establish(&profile, tokens, Utc::now())?;
    /// ```
    pub fn establish(
        profile: &UserProfile,
        tokens: TokenResponse,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let token_expiry = token_expiry(&tokens, now)?;

        Ok(Self {
            user_id: profile.id.clone(),
            display_name: profile
                .display_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "User".to_string()),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token.filter(|token| !token.is_empty()),
            token_expiry,
        })
    }

    /// Stores the result of a refresh grant.
    ///
    /// The refresh token is only replaced when the response carries a new one;
    /// Spotify usually omits it and the previous token stays valid.
    ///
    /// # Errors
    ///
    /// Same validation as [`Session::establish`]. On error the session is left
    /// untouched.
    pub fn apply_refresh(
        &mut self,
        tokens: TokenResponse,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.token_expiry = token_expiry(&tokens, now)?;
        self.access_token = tokens.access_token;
        if let Some(refresh_token) = tokens.refresh_token.filter(|token| !token.is_empty()) {
            self.refresh_token = Some(refresh_token);
        }
        Ok(())
    }

    /// True once `now` is inside the refresh margin before the token expiry.
    ///
    /// With the 60 second margin a token expiring in 30 seconds needs a
    /// refresh, one expiring in 120 seconds does not.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now > self.token_expiry - Duration::seconds(REFRESH_MARGIN_SECS)
    }

    /// Spotify user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Display name, `"User"` when the profile has none.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Current access token. Use [`crate::management::TokenManager`] to get
    /// one that is guaranteed to be fresh.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Refresh token, `None` when Spotify never issued one.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Absolute expiry of the access token.
    pub fn token_expiry(&self) -> DateTime<Utc> {
        self.token_expiry
    }
}

fn token_expiry(tokens: &TokenResponse, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    if tokens.access_token.is_empty() {
        return Err(AppError::InvalidToken("missing access token".to_string()));
    }

    let expires_in = tokens.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
    if expires_in <= 0 {
        return Err(AppError::InvalidToken(format!(
            "token already expired (expires_in={})",
            expires_in
        )));
    }

    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::InvalidToken(format!(
                "token lifetime out of range (expires_in={})",
                expires_in
            ))
        })
}
