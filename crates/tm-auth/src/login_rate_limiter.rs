use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use tm_core::ErrorLocation;

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use governor::{
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};

/// Keyed rate limiter for credential-bearing endpoints.
///
/// Login attempts are keyed by the submitted email, refresh attempts by the
/// presented token; both keys are opaque to the limiter. The quota allows a
/// burst of `max_attempts`, replenishing evenly over the window.
pub struct LoginRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    config: RateLimitConfig,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let max_attempts =
            NonZeroU32::new(config.max_attempts).unwrap_or(NonZeroU32::new(1).unwrap());
        let replenish_period =
            Duration::from_secs(config.window_secs.max(1)) / max_attempts.get();
        let quota = Quota::with_period(replenish_period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::new(1).unwrap()))
            .allow_burst(max_attempts);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Check if an attempt for `key` is allowed, returns error if rate limited
    #[track_caller]
    pub fn check(&self, key: &str) -> AuthErrorResult<()> {
        self.limiter
            .check_key(&key.to_string())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_attempts,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
