use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{views, warning};

/// Errors raised while handling a browser request.
///
/// The authentication variants never reach the user as an error page: they
/// turn into a redirect to `/login` so the user can sign in again.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no authenticated session")]
    Unauthenticated,

    #[error("session has no refresh token")]
    MissingRefreshToken,

    #[error("token refresh rejected: {0}")]
    UpstreamAuth(String),

    #[error("Spotify responded with {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid token response: {0}")]
    InvalidToken(String),

    #[error("login callback rejected: {0}")]
    Callback(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for errors that require the user to go through the login again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::Unauthenticated | AppError::MissingRefreshToken | AppError::UpstreamAuth(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.requires_login() {
            if !matches!(self, AppError::Unauthenticated) {
                warning!("Sending user back to login: {}", self);
            }
            return Redirect::to("/login").into_response();
        }

        let status = match &self {
            AppError::Callback(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };

        warning!("{}", self);
        (status, Html(views::error_page(status, &self.to_string()))).into_response()
    }
}
