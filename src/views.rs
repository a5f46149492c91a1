//! HTML rendering.
//!
//! Pages are plain strings assembled with `format!`; every value that comes
//! from Spotify or the session goes through [`escape_html`] first.

use axum::http::StatusCode;

use crate::{
    session::Session,
    types::PlaybackSnapshot,
    utils::{escape_html, format_duration_ms},
};

/// Polling script served at `/static/now_playing.js`.
pub const NOW_PLAYING_JS: &str = include_str!("../static/now_playing.js");

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

pub fn home(session: Option<&Session>) -> String {
    let body = match session {
        Some(session) => format!(
            r#"<h1>Welcome {name}!</h1>
<p><a href="/now-playing">See Now Playing</a></p>
<p><a href="/logout">Logout</a></p>"#,
            name = escape_html(session.display_name())
        ),
        None => r#"<h1>Welcome! Please <a href="/login">login with Spotify</a></h1>"#.to_string(),
    };

    layout("nowplaying", &body)
}

pub fn now_playing(session: &Session, snapshot: Option<&PlaybackSnapshot>) -> String {
    let track_id = snapshot
        .and_then(|snapshot| snapshot.track_id.as_deref())
        .unwrap_or_default();
    let (progress_ms, duration_ms) = snapshot
        .map(|snapshot| (snapshot.progress_ms, snapshot.duration_ms))
        .unwrap_or((0, 0));

    let body = format!(
        r#"<p>Signed in as {name} · <a href="/logout">Logout</a></p>
<div id="track-info" data-track-id="{track_id}">
{track_info}
</div>
<progress id="progress-bar" max="{max}" value="{progress_ms}"></progress>
<p id="progress-text">{progress_secs} seconds of {duration_secs}</p>
<div class="controls">
  <button type="button" data-action="previous">Previous</button>
  <button type="button" data-action="play">Play</button>
  <button type="button" data-action="pause">Pause</button>
  <button type="button" data-action="next">Next</button>
</div>
<div id="playback-status"></div>
<script src="/static/now_playing.js"></script>"#,
        name = escape_html(session.display_name()),
        track_id = escape_html(track_id),
        track_info = track_info(snapshot),
        max = duration_ms.max(1),
        progress_ms = progress_ms,
        progress_secs = progress_ms / 1000,
        duration_secs = duration_ms / 1000,
    );

    layout("Now Playing", &body)
}

/// Fragment swapped into `#track-info` whenever the track changes.
pub fn track_info(snapshot: Option<&PlaybackSnapshot>) -> String {
    let Some(snapshot) = snapshot else {
        return "<p>No track playing</p>".to_string();
    };

    let artwork = snapshot
        .artwork_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img src="{url}" alt="Album artwork" width="300" height="300">"#,
                url = escape_html(url)
            )
        })
        .unwrap_or_default();
    let album = snapshot
        .album
        .as_deref()
        .map(|album| format!("<p class=\"album\">{}</p>", escape_html(album)))
        .unwrap_or_default();

    format!(
        r#"{artwork}
<h2 class="track">{name}</h2>
<p class="artists">{artists}</p>
{album}
<p class="duration">{duration}</p>"#,
        artwork = artwork,
        name = escape_html(&snapshot.name),
        artists = escape_html(&snapshot.artists),
        album = album,
        duration = format_duration_ms(snapshot.duration_ms),
    )
}

/// Fragment swapped into `#playback-status` after a playback command.
pub fn playback_status(status: &str) -> String {
    format!(
        r#"<p class="playback-status">{}</p>"#,
        escape_html(status)
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p>{status}</p>
<pre>{message}</pre>
<p><a href="/">Back to start</a> · <a href="/login">Login again</a></p>"#,
        status = escape_html(&status.to_string()),
        message = escape_html(message)
    );

    layout("Error", &body)
}
