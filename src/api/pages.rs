use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{server::AppState, views};

pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let session = state.current_session(&jar).await;
    Html(views::home(session.as_ref()))
}

pub async fn now_playing_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        views::NOW_PLAYING_JS,
    )
}
