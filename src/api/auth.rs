use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::AppError,
    info,
    server::{AppState, session_id},
    session::{SESSION_COOKIE, Session},
    utils,
};

/// Cookie binding the callback to the browser that started the login.
pub const STATE_COOKIE: &str = "nowplaying_oauth_state";

const STATE_LEN: usize = 32;

/// A login has this long to come back through `/callback`.
pub const STATE_MAX_AGE_SECS: i64 = 600;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let oauth_state = utils::generate_token(STATE_LEN);
    let url = state.api.authorize_url(&oauth_state)?;

    let mut cookie = state.cookie(STATE_COOKIE, oauth_state);
    cookie.set_max_age(time::Duration::seconds(STATE_MAX_AGE_SECS));

    Ok((jar.add(cookie), Redirect::to(&url)))
}

pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect), AppError> {
    let expected_state = jar.get(STATE_COOKIE).map(|cookie| cookie.value().to_string());
    let jar = jar.remove(Cookie::build(STATE_COOKIE).path("/"));

    if let Some(error) = params.error {
        return Err(AppError::Callback(format!(
            "Spotify did not grant access: {}",
            error
        )));
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::Callback("missing authorization code".to_string()))?;

    match (expected_state, params.state) {
        (Some(expected), Some(actual)) if expected == actual => {}
        _ => {
            return Err(AppError::Callback(
                "state does not match the login request".to_string(),
            ));
        }
    }

    let tokens = state.api.exchange_code(&code).await?;
    let profile = state.api.current_user(&tokens.access_token).await?;
    let session = Session::establish(&profile, tokens, Utc::now())?;

    if let Some(previous) = session_id(&jar) {
        state.sessions.clear(&previous).await;
    }

    info!("{} ({}) logged in", session.display_name(), session.user_id());
    let id = state.sessions.create(session).await;

    Ok((
        jar.add(state.cookie(SESSION_COOKIE, id)),
        Redirect::to("/now-playing"),
    ))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(id) = session_id(&jar) {
        if let Some(session) = state.sessions.get(&id).await {
            info!("{} logged out", session.user_id());
        }
        state.sessions.clear(&id).await;
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/"),
    )
}
