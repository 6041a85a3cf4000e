//! Auth gateway - orchestrates register, login, refresh, and logout.
//!
//! Session lifecycle per identity: no session -> active (login) -> active
//! (refresh rotates the token) or expired (lazily, at validation time) ->
//! no session (logout). One refresh token per user: every login or refresh
//! overwrites the stored token, invalidating the previous one immediately.
//!
//! Each operation is a single read-modify-write against the credential
//! store. Concurrent refreshes with the same token race; last writer wins
//! and only one resulting pair stays valid, which the client resolves by
//! logging in again on its next auth failure.

use crate::{password, AuthError, Result as AuthErrorResult, TokenIssuer};

use tm_core::{ErrorLocation, User};
use tm_db::UserRepository;

use std::panic::Location;

use chrono::{Duration, Utc};
use log::{debug, info};

pub struct AuthService {
    users: UserRepository,
    issuer: TokenIssuer,
    refresh_token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: UserRepository, issuer: TokenIssuer, refresh_token_ttl: Duration) -> Self {
        Self {
            users,
            issuer,
            refresh_token_ttl,
        }
    }

    /// Create a new identity. Does not log the user in.
    ///
    /// Rejects blank fields and duplicate emails (exact, case-sensitive
    /// match). The store's unique index catches the race where two
    /// registrations with the same email pass the pre-check concurrently.
    pub async fn register(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<User> {
        validate_not_blank("userName", user_name)?;
        validate_not_blank("email", email)?;
        validate_not_blank("password", password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let material = password::hash(password);
        let user = User::new(
            user_name.to_string(),
            email.to_string(),
            material.hash,
            material.salt,
        );

        let created = self.users.create(&user).await?;
        info!("Registered user {}", created.id);
        Ok(created)
    }

    /// Verify credentials and start a session.
    ///
    /// Unknown email and wrong password collapse into the same outcome so
    /// the endpoint cannot be used to enumerate accounts. On success the
    /// stored refresh token (if any) is overwritten.
    pub async fn login(&self, email: &str, password: &str) -> AuthErrorResult<(TokenPair, User)> {
        validate_not_blank("email", email)?;
        validate_not_blank("password", password)?;

        let Some(mut user) = self.users.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !password::verify(password, &user.password_hash, &user.password_salt) {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let pair = self.start_session(&mut user).await?;
        info!("User {} logged in", user.id);
        Ok((pair, user))
    }

    /// Exchange a refresh token for a fresh pair, rotating the stored token.
    ///
    /// Validity requires: record found by exact token match, stored token
    /// present, and strictly now < stored expiry. Any failure yields the
    /// same outcome with the store unchanged.
    pub async fn refresh(&self, refresh_token: &str) -> AuthErrorResult<(TokenPair, User)> {
        validate_not_blank("refreshToken", refresh_token)?;

        let Some(mut user) = self.users.find_by_refresh_token(refresh_token).await? else {
            return Err(AuthError::InvalidRefreshToken {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !user.is_refresh_token_valid(refresh_token, Utc::now()) {
            return Err(AuthError::InvalidRefreshToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let pair = self.start_session(&mut user).await?;
        debug!("Rotated refresh token for user {}", user.id);
        Ok((pair, user))
    }

    /// End the session for an already-authenticated caller. Idempotent:
    /// succeeds whether or not a session was active.
    pub async fn logout(&self, user_id: i64) -> AuthErrorResult<()> {
        if let Some(mut user) = self.users.find_by_id(user_id).await? {
            user.clear_refresh_token();
            self.users.save(&user).await?;
            info!("User {} logged out", user.id);
        }

        Ok(())
    }

    /// Mint a new pair and persist the rotated refresh state.
    async fn start_session(&self, user: &mut User) -> AuthErrorResult<TokenPair> {
        let access_token = self.issuer.issue_access_token(user)?;
        let refresh_token = self.issuer.issue_refresh_token();

        user.set_refresh_token(refresh_token.clone(), Utc::now() + self.refresh_token_ttl);
        self.users.save(user).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[track_caller]
fn validate_not_blank(field: &'static str, value: &str) -> AuthErrorResult<()> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation {
            field,
            message: format!("{field} is required"),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}
