//! Expiring key/value storage. Twogether keeps third-party access tokens here.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    /// The value under `key`, unless it has expired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value`. Without a `ttl` it lives until deleted.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

#[derive(Debug, thiserror::Error)]
#[error("Cache unavailable: {0}")]
pub struct CacheError(pub String);
