use axum::{Json, extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppError,
    server::AppState,
    types::{PlaybackProgress, PlaybackSnapshot},
    views,
};

async fn snapshot(
    state: &AppState,
    access_token: &str,
) -> Result<Option<PlaybackSnapshot>, AppError> {
    let playback = state.api.current_playback(access_token).await?;
    Ok(playback.and_then(|playback| playback.snapshot()))
}

pub async fn now_playing(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let authorized = state.authorize(&jar).await?;
    let snapshot = snapshot(&state, &authorized.access_token).await?;

    Ok(Html(views::now_playing(
        &authorized.session,
        snapshot.as_ref(),
    )))
}

pub async fn now_playing_progress(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<PlaybackProgress>, AppError> {
    let authorized = state.authorize(&jar).await?;
    let progress = snapshot(&state, &authorized.access_token)
        .await?
        .map(|snapshot| PlaybackProgress::from(&snapshot))
        .unwrap_or_else(PlaybackProgress::idle);

    Ok(Json(progress))
}

pub async fn now_playing_track_info(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let authorized = state.authorize(&jar).await?;
    let snapshot = snapshot(&state, &authorized.access_token).await?;

    Ok(Html(views::track_info(snapshot.as_ref())))
}
