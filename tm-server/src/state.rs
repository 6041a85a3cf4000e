use crate::error::{Result as ServerErrorResult, ServerError};

use tm_auth::{AuthService, JwtValidator, LoginRateLimiter, RateLimitConfig, TokenIssuer};
use tm_db::UserRepository;

use std::sync::Arc;

use chrono::Duration;
use sqlx::SqlitePool;

/// Shared application state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthService>,
    pub jwt_validator: Arc<JwtValidator>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    /// Wire the auth stack from validated configuration.
    pub fn new(pool: SqlitePool, config: &tm_config::Config) -> ServerErrorResult<Self> {
        let secret = config
            .auth
            .jwt_secret
            .as_ref()
            .ok_or_else(|| ServerError::Config(tm_config::ConfigError::auth(
                "auth.jwt_secret is required",
            )))?;

        let issuer = TokenIssuer::new(
            secret.as_bytes(),
            config.auth.issuer.clone(),
            config.auth.audience.clone(),
            Duration::seconds(config.auth.access_token_ttl_secs as i64),
        );
        let jwt_validator = JwtValidator::with_hs256(
            secret.as_bytes(),
            &config.auth.issuer,
            &config.auth.audience,
        );
        let auth = AuthService::new(
            UserRepository::new(pool.clone()),
            issuer,
            Duration::seconds(config.auth.refresh_token_ttl_secs as i64),
        );
        let login_limiter = LoginRateLimiter::new(RateLimitConfig {
            max_attempts: config.rate_limit.max_attempts,
            window_secs: config.rate_limit.window_secs,
        });

        Ok(Self {
            pool,
            auth: Arc::new(auth),
            jwt_validator: Arc::new(jwt_validator),
            login_limiter: Arc::new(login_limiter),
        })
    }
}
