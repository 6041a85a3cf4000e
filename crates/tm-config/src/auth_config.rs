use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_AUDIENCE,
    DEFAULT_ISSUER, DEFAULT_REFRESH_TOKEN_TTL_SECS, MIN_JWT_SECRET_BYTES,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HS256 signing secret. Required; no default is generated so a
    /// misconfigured deployment fails at startup instead of signing tokens
    /// with a guessable key.
    pub jwt_secret: Option<String>,
    pub issuer: String,
    pub audience: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            issuer: String::from(DEFAULT_ISSUER),
            audience: String::from(DEFAULT_AUDIENCE),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_secs: DEFAULT_REFRESH_TOKEN_TTL_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set it in config.toml or TM_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.len() < MIN_JWT_SECRET_BYTES => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} bytes, got {}",
                    MIN_JWT_SECRET_BYTES,
                    secret.len()
                )));
            }
            Some(_) => {}
        }

        if self.issuer.trim().is_empty() {
            return Err(ConfigError::auth("auth.issuer must not be empty"));
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::auth("auth.audience must not be empty"));
        }
        if self.access_token_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.access_token_ttl_secs must be > 0"));
        }
        if self.refresh_token_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.refresh_token_ttl_secs must be > 0"));
        }

        Ok(())
    }
}
