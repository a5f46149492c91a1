mod common;

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use nowplaying::{
    AppError,
    session::{DEFAULT_EXPIRES_IN_SECS, REFRESH_MARGIN_SECS, Session, SessionStore},
    types::UserProfile,
};

use common::{profile, session_expiring_in, tokens};

#[test]
fn test_establish_copies_profile_and_tokens() {
    let now = Utc::now();
    let session =
        Session::establish(&profile(), tokens("access", Some("refresh"), Some(3600)), now).unwrap();

    assert_eq!(session.user_id(), "user-1");
    assert_eq!(session.display_name(), "Test User");
    assert_eq!(session.access_token(), "access");
    assert_eq!(session.refresh_token(), Some("refresh"));
    assert_eq!(session.token_expiry(), now + Duration::seconds(3600));
}

#[test]
fn test_establish_defaults_missing_fields() {
    let now = Utc::now();
    let anonymous = UserProfile {
        id: "user-2".to_string(),
        display_name: None,
    };
    let session = Session::establish(&anonymous, tokens("access", None, None), now).unwrap();

    assert_eq!(session.display_name(), "User");
    assert_eq!(session.refresh_token(), None);
    assert_eq!(
        session.token_expiry(),
        now + Duration::seconds(DEFAULT_EXPIRES_IN_SECS)
    );
}

#[test]
fn test_establish_rejects_unusable_tokens() {
    let now = Utc::now();

    let empty = Session::establish(&profile(), tokens("", Some("refresh"), Some(3600)), now);
    assert!(matches!(empty, Err(AppError::InvalidToken(_))));

    let expired = Session::establish(&profile(), tokens("access", Some("refresh"), Some(0)), now);
    assert!(matches!(expired, Err(AppError::InvalidToken(_))));
}

#[test]
fn test_establish_rejects_out_of_range_lifetime() {
    let now = Utc::now();

    for expires_in in [i64::MAX, 100_000_000_000_000] {
        let tokens = tokens("access", Some("refresh"), Some(expires_in));
        let result = Session::establish(&profile(), tokens, now);
        assert!(matches!(result, Err(AppError::InvalidToken(_))), "{}", expires_in);
    }
}

#[test]
fn test_needs_refresh_inside_margin() {
    let now = Utc::now();

    assert!(session_expiring_in(30, Some("refresh")).needs_refresh(now));
    assert!(!session_expiring_in(120, Some("refresh")).needs_refresh(now));
}

#[test]
fn test_needs_refresh_boundary() {
    let now = Utc::now();
    let session =
        Session::establish(&profile(), tokens("access", None, Some(120)), now).unwrap();

    let at_margin = session.token_expiry() - Duration::seconds(REFRESH_MARGIN_SECS);
    assert!(!session.needs_refresh(at_margin));
    assert!(session.needs_refresh(at_margin + Duration::seconds(1)));
}

#[test]
fn test_apply_refresh_preserves_refresh_token() {
    let mut session = session_expiring_in(30, Some("keep-me"));
    let now = Utc::now();

    session
        .apply_refresh(tokens("new-access", None, Some(3600)), now)
        .unwrap();

    assert_eq!(session.access_token(), "new-access");
    assert_eq!(session.refresh_token(), Some("keep-me"));
    assert_eq!(session.token_expiry(), now + Duration::seconds(3600));
    assert!(!session.needs_refresh(now));
}

#[test]
fn test_apply_refresh_rotates_refresh_token() {
    let mut session = session_expiring_in(30, Some("old-refresh"));

    session
        .apply_refresh(tokens("new-access", Some("new-refresh"), Some(3600)), Utc::now())
        .unwrap();

    assert_eq!(session.refresh_token(), Some("new-refresh"));
}

#[test]
fn test_apply_refresh_rejects_empty_access_token() {
    let mut session = session_expiring_in(30, Some("refresh"));
    let before = session.clone();

    let result = session.apply_refresh(tokens("", None, Some(3600)), Utc::now());

    assert!(matches!(result, Err(AppError::InvalidToken(_))));
    assert_eq!(session, before);
}

#[test]
fn test_apply_refresh_rejects_out_of_range_lifetime() {
    let mut session = session_expiring_in(30, Some("refresh"));
    let before = session.clone();

    let result = session.apply_refresh(tokens("new-access", None, Some(i64::MAX)), Utc::now());

    assert!(matches!(result, Err(AppError::InvalidToken(_))));
    assert_eq!(session, before);
}

#[tokio::test]
async fn test_store_get_set_clear() {
    let store = SessionStore::new(StdDuration::from_secs(60));
    let session = session_expiring_in(3600, Some("refresh"));

    let id = store.create(session.clone()).await;
    assert_eq!(store.get(&id).await, Some(session.clone()));
    assert_eq!(store.get("unknown").await, None);

    let mut updated = session.clone();
    updated
        .apply_refresh(tokens("updated", None, Some(3600)), Utc::now())
        .unwrap();
    store.set(&id, updated.clone()).await;
    assert_eq!(store.get(&id).await, Some(updated));

    store.clear(&id).await;
    assert_eq!(store.get(&id).await, None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_issues_distinct_ids() {
    let store = SessionStore::new(StdDuration::from_secs(60));

    let first = store.create(session_expiring_in(3600, None)).await;
    let second = store.create(session_expiring_in(3600, None)).await;

    assert_ne!(first, second);
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_store_expires_sessions_after_ttl() {
    let store = SessionStore::new(StdDuration::ZERO);

    let id = store.create(session_expiring_in(3600, None)).await;

    assert_eq!(store.get(&id).await, None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_prunes_expired_sessions() {
    let store = SessionStore::new(StdDuration::ZERO);
    store.set("a", session_expiring_in(3600, None)).await;
    store.set("b", session_expiring_in(3600, None)).await;

    assert_eq!(store.prune_expired().await, 2);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_accepts_unrepresentable_ttl() {
    let store = SessionStore::new(StdDuration::MAX);
    let session = session_expiring_in(3600, None);

    let id = store.create(session.clone()).await;

    assert_eq!(store.get(&id).await, Some(session));
    assert_eq!(store.prune_expired().await, 0);
}
