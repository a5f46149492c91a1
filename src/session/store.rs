use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::utils;

use super::Session;

const SESSION_ID_LEN: usize = 48;

struct Entry {
    session: Session,
    /// `None` when the TTL is too large to represent; such entries never expire.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// In-memory session storage.
///
/// Entries are keyed by the digest of the browser-side session id and expire
/// after `ttl` without a write. Sessions are lost when the process restarts.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store whose entries live `ttl` after their last write.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Stores a new session and returns the id to hand to the browser.
    ///
    /// Expired entries are pruned first, so the map does not grow with
    /// abandoned logins.
    ///
    /// # Example
    ///
    /// ```
    /// let id = store.create(session).await;
    /// let jar = jar.add(Cookie::new(SESSION_COOKIE, id));
    /// ```
    pub async fn create(&self, session: Session) -> String {
        self.prune_expired().await;

        let id = utils::generate_token(SESSION_ID_LEN);
        self.set(&id, session).await;
        id
    }

    /// Returns a copy of the session behind `id`, if it exists and has not expired.
    pub async fn get(&self, id: &str) -> Option<Session> {
        let key = utils::digest(id);
        let mut sessions = self.sessions.lock().await;

        match sessions.get(&key) {
            Some(entry) if entry.is_live(Instant::now()) => Some(entry.session.clone()),
            Some(_) => {
                sessions.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Writes `session` back under `id` and restarts its TTL.
    pub async fn set(&self, id: &str, session: Session) {
        let entry = Entry {
            session,
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.sessions.lock().await.insert(utils::digest(id), entry);
    }

    /// Removes the session behind `id`. Unknown ids are ignored.
    pub async fn clear(&self, id: &str) {
        self.sessions.lock().await.remove(&utils::digest(id));
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(now));
        before - sessions.len()
    }

    /// Number of stored sessions, including expired ones not yet pruned.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// See [`SessionStore::len`].
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
