use crate::{AuthError, Claims, Result as AuthErrorResult};

use tm_core::{ErrorLocation, User};

use std::panic::Location;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rand::rngs::OsRng;
use rand::RngCore;

/// Refresh token entropy in bytes (~88 chars base64-encoded).
const REFRESH_TOKEN_LEN: usize = 64;

/// Mints the two token kinds.
///
/// Access tokens are signed, self-contained claim sets; refresh tokens are
/// opaque random strings whose only meaning is an exact match against the
/// credential store. The signing key, issuer, audience, and access TTL all
/// arrive through the constructor - nothing is read from ambient state.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    access_token_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], issuer: String, audience: String, access_token_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            issuer,
            audience,
            access_token_ttl,
        }
    }

    /// Sign an access token for `user`, expiring `access_token_ttl` from now.
    #[track_caller]
    pub fn issue_access_token(&self, user: &User) -> AuthErrorResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.user_name.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: (now + self.access_token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Generate an opaque refresh token from the operating system CSPRNG.
    pub fn issue_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_LEN];
        OsRng.fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}
