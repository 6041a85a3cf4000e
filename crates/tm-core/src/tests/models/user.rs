use crate::{SessionState, User};

use chrono::{Duration, Utc};

fn test_user() -> User {
    User::new(
        "alice".to_string(),
        "a@x.com".to_string(),
        "aGFzaA==".to_string(),
        "c2FsdA==".to_string(),
    )
}

#[test]
fn test_new_user_has_no_session() {
    let user = test_user();
    assert_eq!(user.session_state(Utc::now()), SessionState::NoSession);
    assert!(!user.is_refresh_token_valid("anything", Utc::now()));
}

#[test]
fn test_set_refresh_token_activates_session() {
    let mut user = test_user();
    let now = Utc::now();
    user.set_refresh_token("token-1".to_string(), now + Duration::days(7));

    assert_eq!(user.session_state(now), SessionState::Active);
    assert!(user.is_refresh_token_valid("token-1", now));
    assert!(!user.is_refresh_token_valid("token-2", now));
}

#[test]
fn test_session_expires_lazily() {
    let mut user = test_user();
    let now = Utc::now();
    user.set_refresh_token("token-1".to_string(), now - Duration::seconds(1));

    assert_eq!(user.session_state(now), SessionState::Expired);
    assert!(!user.is_refresh_token_valid("token-1", now));
}

#[test]
fn test_token_presented_exactly_at_expiry_is_rejected() {
    let mut user = test_user();
    let expires_at = Utc::now() + Duration::days(7);
    user.set_refresh_token("token-1".to_string(), expires_at);

    assert!(user.is_refresh_token_valid("token-1", expires_at - Duration::seconds(1)));
    assert!(!user.is_refresh_token_valid("token-1", expires_at));
    assert!(!user.is_refresh_token_valid("token-1", expires_at + Duration::seconds(1)));
}

#[test]
fn test_empty_presented_token_never_matches() {
    let mut user = test_user();
    user.set_refresh_token(String::new(), Utc::now() + Duration::days(7));
    assert!(!user.is_refresh_token_valid("", Utc::now()));
}

#[test]
fn test_clear_refresh_token_is_idempotent() {
    let mut user = test_user();
    user.set_refresh_token("token-1".to_string(), Utc::now() + Duration::days(7));

    user.clear_refresh_token();
    assert_eq!(user.session_state(Utc::now()), SessionState::NoSession);
    assert_eq!(user.refresh_token_expires_at, None);

    user.clear_refresh_token();
    assert_eq!(user.session_state(Utc::now()), SessionState::NoSession);
}

#[test]
fn test_new_login_supersedes_previous_token() {
    let mut user = test_user();
    let now = Utc::now();
    user.set_refresh_token("token-1".to_string(), now + Duration::days(7));
    user.set_refresh_token("token-2".to_string(), now + Duration::days(7));

    assert!(!user.is_refresh_token_valid("token-1", now));
    assert!(user.is_refresh_token_valid("token-2", now));
}

#[test]
fn test_debug_redacts_credential_material() {
    let mut user = test_user();
    user.set_refresh_token("super-secret".to_string(), Utc::now() + Duration::days(7));
    let rendered = format!("{:?}", user);

    assert!(!rendered.contains("aGFzaA=="));
    assert!(!rendered.contains("c2FsdA=="));
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}
