use serde::{Deserialize, Serialize};

/// Token endpoint response for both the authorization-code and refresh grants.
///
/// Spotify omits `refresh_token` on most refresh responses; the previous one
/// stays valid in that case.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlayback {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<PlaybackItem>,
}

/// The track (or episode) in a playback response.
///
/// Local files have no `id`, episodes have no `album`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Read-only projection of the current playback used for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub track_id: Option<String>,
    pub name: String,
    pub artists: String,
    pub album: Option<String>,
    pub artwork_url: Option<String>,
    pub progress_ms: u64,
    pub duration_ms: u64,
    pub is_playing: bool,
}

impl CurrentPlayback {
    /// Projects the response onto a snapshot, `None` when no item is loaded
    /// (e.g. while an ad plays or right after the device went idle).
    pub fn snapshot(&self) -> Option<PlaybackSnapshot> {
        let item = self.item.as_ref()?;
        let album = item.album.as_ref();

        Some(PlaybackSnapshot {
            track_id: item.id.clone(),
            name: item.name.clone(),
            artists: item
                .artists
                .iter()
                .map(|artist| artist.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: album.map(|album| album.name.clone()),
            // Spotify lists images widest first
            artwork_url: album
                .and_then(|album| album.images.first())
                .map(|image| image.url.clone()),
            progress_ms: self.progress_ms.unwrap_or(0),
            duration_ms: item.duration_ms,
            is_playing: self.is_playing,
        })
    }
}

/// JSON body of `/now-playing/progress`, polled by the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackProgress {
    pub track_id: Option<String>,
    pub progress_ms: u64,
    pub duration_ms: u64,
}

impl PlaybackProgress {
    pub fn idle() -> Self {
        Self {
            track_id: None,
            progress_ms: 0,
            duration_ms: 0,
        }
    }
}

impl From<&PlaybackSnapshot> for PlaybackProgress {
    fn from(snapshot: &PlaybackSnapshot) -> Self {
        Self {
            track_id: snapshot.track_id.clone(),
            progress_ms: snapshot.progress_ms,
            duration_ms: snapshot.duration_ms,
        }
    }
}
