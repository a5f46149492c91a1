use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, server::AppState, spotify::player::PlayerCommand, views};

/// Runs a playback command and renders the resulting status.
///
/// A rejected command is not an error: the fragment just reports the state
/// the player most likely stayed in.
async fn run(
    state: &AppState,
    jar: &CookieJar,
    command: PlayerCommand,
) -> Result<Html<String>, AppError> {
    let authorized = state.authorize(jar).await?;
    let accepted = state.api.control(&authorized.access_token, command).await;

    let status = match (command, accepted) {
        (PlayerCommand::Play, true) => "Playing",
        (PlayerCommand::Play, false) => "Paused",
        (PlayerCommand::Pause, true) => "Paused",
        (PlayerCommand::Pause, false) => "Playing",
        (PlayerCommand::Next, true) => "Skipped to next track",
        (PlayerCommand::Next, false) => "Failed to skip to next track",
        (PlayerCommand::Previous, true) => "Skipped to previous track",
        (PlayerCommand::Previous, false) => "Failed to skip to previous track",
    };

    Ok(Html(views::playback_status(status)))
}

pub async fn player_play(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    run(&state, &jar, PlayerCommand::Play).await
}

pub async fn player_pause(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    run(&state, &jar, PlayerCommand::Pause).await
}

pub async fn player_next(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    run(&state, &jar, PlayerCommand::Next).await
}

pub async fn player_previous(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    run(&state, &jar, PlayerCommand::Previous).await
}
