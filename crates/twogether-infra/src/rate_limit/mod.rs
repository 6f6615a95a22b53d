//! Rate limiting.

mod memory;

pub use memory::{KeyedRateLimiter, RateLimitConfig};
