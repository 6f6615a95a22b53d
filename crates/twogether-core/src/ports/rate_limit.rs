//! Request throttling, keyed by client address.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one request for `client` and decide whether it goes through.
    async fn check(&self, client: &str) -> Result<Decision, RateLimitError>;
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    /// How long a throttled client should wait. Zero when allowed.
    pub retry_after: Duration,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after: Duration::ZERO,
        }
    }

    pub fn throttle(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            retry_after,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Invalid rate limit settings: {0}")]
    Misconfigured(String),
}
