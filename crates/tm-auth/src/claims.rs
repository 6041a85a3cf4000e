use crate::{AuthError, Result as AuthErrorResult};

use tm_core::ErrorLocation;

use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Access-token claim set.
///
/// Self-contained: a verifier needs nothing beyond the shared signing secret
/// to authenticate a request carrying these claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, decimal-encoded
    pub sub: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
}

impl Claims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.sub.parse::<i64>().is_err() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub must be a decimal user id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Subject decoded as the store's integer user id
    #[track_caller]
    pub fn user_id(&self) -> AuthErrorResult<i64> {
        self.sub.parse::<i64>().map_err(|_| AuthError::InvalidClaim {
            claim: "sub".to_string(),
            message: "sub must be a decimal user id".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
