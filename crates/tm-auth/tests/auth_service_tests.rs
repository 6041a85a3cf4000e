//! End-to-end tests for the auth gateway against an in-memory store.

use tm_auth::{AuthError, AuthService, TokenIssuer};
use tm_db::UserRepository;

use chrono::{Duration, Utc};
use googletest::prelude::*;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("../tm-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

async fn create_service(pool: &SqlitePool) -> AuthService {
    let issuer = TokenIssuer::new(
        SECRET,
        "taskman".to_string(),
        "taskman-clients".to_string(),
        Duration::hours(2),
    );
    AuthService::new(
        UserRepository::new(pool.clone()),
        issuer,
        Duration::days(7),
    )
}

#[tokio::test]
async fn given_valid_registration_when_registered_then_no_session_started() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;

    let user = service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();

    assert_that!(user.id, gt(0));
    assert_that!(user.user_name, eq("alice"));
    // Registration does not auto-login
    assert_that!(user.refresh_token, none());
}

#[tokio::test]
async fn given_blank_fields_when_registered_then_validation_error() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;

    for (user_name, email, password) in [
        ("", "a@x.com", "Secret123"),
        ("  ", "a@x.com", "Secret123"),
        ("alice", "", "Secret123"),
        ("alice", "a@x.com", ""),
        ("alice", "a@x.com", "   "),
    ] {
        let result = service.register(user_name, email, password).await;
        assert!(matches!(result, Err(AuthError::Validation { .. })));
    }
}

#[tokio::test]
async fn given_registered_email_when_registered_again_then_duplicate_error() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();

    let result = service.register("alice2", "a@x.com", "Other456").await;

    assert!(matches!(result, Err(AuthError::DuplicateEmail { .. })));
}

#[tokio::test]
async fn given_correct_credentials_when_logged_in_then_pair_and_view_returned() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();

    let (pair, user) = service.login("a@x.com", "Secret123").await.unwrap();

    assert_that!(pair.access_token, not(eq("")));
    assert_that!(pair.refresh_token, not(eq("")));
    assert_that!(pair.access_token, not(eq(pair.refresh_token.as_str())));
    assert_that!(user.user_name, eq("alice"));
    assert_that!(user.email, eq("a@x.com"));
    assert_that!(
        user.refresh_token.as_deref(),
        some(eq(pair.refresh_token.as_str()))
    );
}

#[tokio::test]
async fn given_wrong_password_or_unknown_email_then_same_generic_outcome() {
    // No user enumeration: both failures are indistinguishable
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();

    let wrong_password = service.login("a@x.com", "WrongPass1").await;
    let unknown_email = service.login("nobody@x.com", "Secret123").await;

    let wrong_password = wrong_password.unwrap_err();
    let unknown_email = unknown_email.unwrap_err();
    assert!(matches!(wrong_password, AuthError::InvalidCredentials { .. }));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials { .. }));
    assert_that!(wrong_password.error_code(), eq(unknown_email.error_code()));
}

#[tokio::test]
async fn given_login_when_logged_in_again_then_previous_refresh_token_dies() {
    // Single-session policy: a new login invalidates the old session
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();

    let (first, _) = service.login("a@x.com", "Secret123").await.unwrap();
    let (second, _) = service.login("a@x.com", "Secret123").await.unwrap();

    assert!(matches!(
        service.refresh(&first.refresh_token).await,
        Err(AuthError::InvalidRefreshToken { .. })
    ));
    assert!(service.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn given_refresh_then_rotation_supersedes_the_presented_token() {
    // The full scenario: register -> login -> refresh -> stale refresh fails
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();

    let (original, _) = service.login("a@x.com", "Secret123").await.unwrap();

    let (rotated, user) = service.refresh(&original.refresh_token).await.unwrap();
    assert_that!(rotated.access_token, not(eq(original.access_token.as_str())));
    assert_that!(rotated.refresh_token, not(eq(original.refresh_token.as_str())));
    assert_that!(user.email, eq("a@x.com"));

    // The presented token was rotated away; replaying it fails
    let replay = service.refresh(&original.refresh_token).await;
    assert!(matches!(replay, Err(AuthError::InvalidRefreshToken { .. })));

    // The rotated token is the one that works
    assert!(service.refresh(&rotated.refresh_token).await.is_ok());
}

#[tokio::test]
async fn given_blank_refresh_token_then_validation_error() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;

    assert!(matches!(
        service.refresh("").await,
        Err(AuthError::Validation { .. })
    ));
    assert!(matches!(
        service.refresh("   ").await,
        Err(AuthError::Validation { .. })
    ));
}

#[tokio::test]
async fn given_unknown_refresh_token_then_generic_rejection() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;

    let result = service.refresh("bm90LWEtcmVhbC10b2tlbg==").await;

    assert!(matches!(result, Err(AuthError::InvalidRefreshToken { .. })));
}

#[tokio::test]
async fn given_expired_session_when_refreshed_then_rejected_and_state_unchanged() {
    // Expiry is checked lazily at validation time
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();
    let (pair, _) = service.login("a@x.com", "Secret123").await.unwrap();

    // Age the stored session past its expiry
    let repo = UserRepository::new(pool.clone());
    let mut user = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    user.set_refresh_token(pair.refresh_token.clone(), Utc::now() - Duration::seconds(1));
    repo.save(&user).await.unwrap();

    let result = service.refresh(&pair.refresh_token).await;
    assert!(matches!(result, Err(AuthError::InvalidRefreshToken { .. })));

    // Rejection did not mutate the stored token
    let reloaded = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_that!(
        reloaded.refresh_token.as_deref(),
        some(eq(pair.refresh_token.as_str()))
    );
}

#[tokio::test]
async fn given_logout_then_refresh_rejected_and_logout_idempotent() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;
    service
        .register("alice", "a@x.com", "Secret123")
        .await
        .unwrap();
    let (pair, user) = service.login("a@x.com", "Secret123").await.unwrap();

    service.logout(user.id).await.unwrap();
    // Second logout is also success
    service.logout(user.id).await.unwrap();

    let result = service.refresh(&pair.refresh_token).await;
    assert!(matches!(result, Err(AuthError::InvalidRefreshToken { .. })));
}

#[tokio::test]
async fn given_unknown_user_id_when_logged_out_then_still_success() {
    let pool = create_test_pool().await;
    let service = create_service(&pool).await;

    assert!(service.logout(999).await.is_ok());
}
