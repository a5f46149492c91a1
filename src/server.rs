use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    Res, api,
    error::AppError,
    management::TokenManager,
    session::{SESSION_COOKIE, Session, SessionStore},
    spotify::SpotifyApi,
    success,
};

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<SpotifyApi>,
    pub sessions: SessionStore,
    pub tokens: TokenManager,
    secure_cookies: bool,
}

/// A session that passed the token check, with the access token to use.
pub struct AuthorizedSession {
    pub id: String,
    pub session: Session,
    pub access_token: String,
}

impl AppState {
    pub fn new(api: Arc<SpotifyApi>) -> Self {
        let settings = api.settings();
        Self {
            sessions: SessionStore::new(settings.session_ttl),
            tokens: TokenManager::new(Arc::clone(&api)),
            secure_cookies: settings.secure_cookies(),
            api,
        }
    }

    /// Resolves the session behind the request cookie and makes sure it holds
    /// a usable access token.
    ///
    /// A refreshed session is written back to the store. Sessions whose
    /// refresh failed are dropped so the next request starts from the login.
    pub async fn authorize(&self, jar: &CookieJar) -> Result<AuthorizedSession, AppError> {
        let id = session_id(jar).ok_or(AppError::Unauthenticated)?;
        let Some(mut session) = self.sessions.get(&id).await else {
            return Err(AppError::Unauthenticated);
        };

        match self.tokens.get_valid_access_token(Some(&mut session)).await {
            Ok(access_token) => {
                self.sessions.set(&id, session.clone()).await;
                Ok(AuthorizedSession {
                    id,
                    session,
                    access_token,
                })
            }
            Err(e) => {
                if e.requires_login() {
                    self.sessions.clear(&id).await;
                }
                Err(e)
            }
        }
    }

    /// Looks up the session without touching its tokens.
    pub async fn current_session(&self, jar: &CookieJar) -> Option<Session> {
        let id = session_id(jar)?;
        self.sessions.get(&id).await
    }

    pub fn cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .build()
    }
}

pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/now-playing", get(api::now_playing))
        .route("/now-playing/progress", get(api::now_playing_progress))
        .route("/now-playing/track-info", get(api::now_playing_track_info))
        .route("/player/play", post(api::player_play))
        .route("/player/pause", post(api::player_pause))
        .route("/player/next", post(api::player_next))
        .route("/player/previous", post(api::player_previous))
        .route("/static/now_playing.js", get(api::now_playing_script))
        .with_state(state)
}

pub async fn start_api_server(state: AppState, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
