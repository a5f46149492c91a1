//! Shared test helpers: a mock Spotify server and session fixtures.
//!
//! The mock serves the accounts endpoints under `/api/token` and the Web API
//! under `/v1`, answers with whatever the test configured and records every
//! request it sees.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use nowplaying::{
    config::Settings,
    session::Session,
    types::{TokenResponse, UserProfile},
};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:8000/callback";

struct MockConfig {
    token_status: u16,
    token_body: Value,
    profile_body: Value,
    player_status: u16,
    player_body: String,
    control_status: u16,
    token_requests: Vec<HashMap<String, String>>,
    control_requests: Vec<String>,
    bearer_tokens: Vec<String>,
}

#[derive(Clone)]
pub struct MockSpotify {
    pub base_url: String,
    config: Arc<Mutex<MockConfig>>,
}

impl MockSpotify {
    /// Starts the mock on an ephemeral port.
    pub async fn spawn() -> Self {
        let config = Arc::new(Mutex::new(MockConfig {
            token_status: 200,
            token_body: json!({
                "access_token": "fresh-access",
                "token_type": "Bearer",
                "scope": "user-read-playback-state",
                "expires_in": 3600
            }),
            profile_body: json!({ "id": "user-1", "display_name": "Test User" }),
            player_status: 204,
            player_body: String::new(),
            control_status: 204,
            token_requests: Vec::new(),
            control_requests: Vec::new(),
            bearer_tokens: Vec::new(),
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mock = MockSpotify {
            base_url: format!("http://{}", addr),
            config,
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me", get(me))
            .route("/v1/me/player", get(player))
            .route("/v1/me/player/play", put(control))
            .route("/v1/me/player/pause", put(control))
            .route("/v1/me/player/next", post(control))
            .route("/v1/me/player/previous", post(control))
            .with_state(mock.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        mock
    }

    pub fn settings(&self) -> Settings {
        Settings {
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            redirect_uri: REDIRECT_URI.to_string(),
            scope: nowplaying::config::DEFAULT_SCOPE.to_string(),
            auth_url: format!("{}/authorize", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            api_url: format!("{}/v1", self.base_url),
            server_addr: "127.0.0.1:0".to_string(),
            session_ttl: Duration::from_secs(3600),
            http_timeout: Duration::from_secs(5),
        }
    }

    pub fn set_token_response(&self, status: u16, body: Value) {
        let mut config = self.config.lock().unwrap();
        config.token_status = status;
        config.token_body = body;
    }

    pub fn set_player_response(&self, status: u16, body: &str) {
        let mut config = self.config.lock().unwrap();
        config.player_status = status;
        config.player_body = body.to_string();
    }

    pub fn set_control_status(&self, status: u16) {
        self.config.lock().unwrap().control_status = status;
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.config.lock().unwrap().token_requests.clone()
    }

    pub fn control_requests(&self) -> Vec<String> {
        self.config.lock().unwrap().control_requests.clone()
    }

    pub fn bearer_tokens(&self) -> Vec<String> {
        self.config.lock().unwrap().bearer_tokens.clone()
    }
}

fn record_bearer(mock: &MockSpotify, headers: &HeaderMap) {
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        mock.config
            .lock()
            .unwrap()
            .bearer_tokens
            .push(value.to_string());
    }
}

async fn token(
    State(mock): State<MockSpotify>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut config = mock.config.lock().unwrap();
    config.token_requests.push(form);
    (
        StatusCode::from_u16(config.token_status).unwrap(),
        Json(config.token_body.clone()),
    )
        .into_response()
}

async fn me(State(mock): State<MockSpotify>, headers: HeaderMap) -> Response {
    record_bearer(&mock, &headers);
    let body = mock.config.lock().unwrap().profile_body.clone();
    Json(body).into_response()
}

async fn player(State(mock): State<MockSpotify>, headers: HeaderMap) -> Response {
    record_bearer(&mock, &headers);
    let config = mock.config.lock().unwrap();
    (
        StatusCode::from_u16(config.player_status).unwrap(),
        [("content-type", "application/json")],
        config.player_body.clone(),
    )
        .into_response()
}

async fn control(
    State(mock): State<MockSpotify>,
    method: axum::http::Method,
    uri: axum::http::Uri,
    headers: HeaderMap,
) -> Response {
    record_bearer(&mock, &headers);
    let mut config = mock.config.lock().unwrap();
    config
        .control_requests
        .push(format!("{} {}", method, uri.path()));
    StatusCode::from_u16(config.control_status)
        .unwrap()
        .into_response()
}

pub fn playing_body() -> String {
    json!({
        "is_playing": true,
        "progress_ms": 42_000,
        "item": {
            "id": "track-1",
            "name": "Song <One>",
            "duration_ms": 180_000,
            "artists": [{ "name": "Artist A" }, { "name": "Artist B" }],
            "album": {
                "name": "The Album",
                "images": [
                    { "url": "https://i.scdn.co/image/large", "width": 640, "height": 640 },
                    { "url": "https://i.scdn.co/image/small", "width": 64, "height": 64 }
                ]
            }
        }
    })
    .to_string()
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        display_name: Some("Test User".to_string()),
    }
}

pub fn tokens(access: &str, refresh: Option<&str>, expires_in: Option<i64>) -> TokenResponse {
    TokenResponse {
        access_token: access.to_string(),
        token_type: Some("Bearer".to_string()),
        scope: None,
        expires_in,
        refresh_token: refresh.map(str::to_string),
    }
}

/// A session whose access token expires `secs` seconds from now.
pub fn session_expiring_in(secs: i64, refresh: Option<&str>) -> Session {
    Session::establish(
        &profile(),
        tokens("old-access", refresh, Some(secs)),
        Utc::now(),
    )
    .unwrap()
}
