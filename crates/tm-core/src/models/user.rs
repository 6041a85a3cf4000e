//! User identity - credentials plus refresh-session state.

use crate::SessionState;

use chrono::{DateTime, Utc};

/// A registered user identity.
///
/// `password_hash`/`password_salt` are base64-encoded and always set
/// together once registered. `refresh_token`/`refresh_token_expires_at` are
/// likewise paired: both `Some` while a session exists (active or expired),
/// both `None` after logout.
///
/// `Debug` is implemented by hand so credential material never reaches the
/// logs.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the store on creation; 0 until persisted.
    pub id: i64,
    pub user_name: String,
    /// Login key, unique across the store.
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new identity with freshly derived password material.
    pub fn new(user_name: String, email: String, password_hash: String, password_salt: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_name,
            email,
            password_hash,
            password_salt,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored password material.
    pub fn set_password(&mut self, password_hash: String, password_salt: String) {
        self.password_hash = password_hash;
        self.password_salt = password_salt;
        self.updated_at = Utc::now();
    }

    /// Store a new refresh token, superseding any previous one immediately.
    pub fn set_refresh_token(&mut self, token: String, expires_at: DateTime<Utc>) {
        self.refresh_token = Some(token);
        self.refresh_token_expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Drop the stored refresh token. Idempotent.
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.refresh_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Session state at `now`.
    pub fn session_state(&self, now: DateTime<Utc>) -> SessionState {
        match (&self.refresh_token, self.refresh_token_expires_at) {
            (Some(_), Some(expires_at)) if now < expires_at => SessionState::Active,
            (Some(_), Some(_)) => SessionState::Expired,
            _ => SessionState::NoSession,
        }
    }

    /// Whether `presented` is the currently valid refresh token at `now`.
    ///
    /// Requires an exact match against the stored token and strictly
    /// `now < expires_at`; a token presented exactly at its expiry is
    /// rejected.
    pub fn is_refresh_token_valid(&self, presented: &str, now: DateTime<Utc>) -> bool {
        match (&self.refresh_token, self.refresh_token_expires_at) {
            (Some(stored), Some(expires_at)) => {
                !presented.is_empty() && stored == presented && now < expires_at
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("password_salt", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
