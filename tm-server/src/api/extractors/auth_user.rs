//! Axum extractor for bearer-token authentication.
//!
//! The stateless verification filter: every protected handler takes an
//! `AuthUser`, which validates the access token (signature, expiry, issuer,
//! audience) against the shared secret and exposes the verified claims. No
//! store round-trip happens here.

use crate::api::error::ApiError;
use crate::state::AppState;

use tm_auth::Claims;
use tm_core::ErrorLocation;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

/// Verified identity of the caller, resolved from access-token claims.
pub struct AuthUser {
    pub user_id: i64,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header_value = parts
                .headers
                .get(header::AUTHORIZATION)
                .ok_or_else(|| unauthorized("Missing Authorization header"))?;

            let header_str = header_value
                .to_str()
                .map_err(|_| unauthorized("Malformed Authorization header"))?;

            let token = header_str
                .strip_prefix("Bearer ")
                .ok_or_else(|| unauthorized("Expected Bearer scheme"))?;

            let claims = state.jwt_validator.validate(token).map_err(|e| {
                log::debug!("Access token rejected: {}", e);
                unauthorized("Invalid or missing access token")
            })?;

            let user_id = claims.user_id().map_err(ApiError::from)?;

            Ok(AuthUser { user_id, claims })
        }
    }
}

#[track_caller]
fn unauthorized(message: &str) -> ApiError {
    ApiError::Unauthorized {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
