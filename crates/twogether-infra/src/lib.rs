//! # Twogether Infrastructure
//!
//! Concrete implementations of the ports defined in `twogether-core`:
//! persistence, token and password services, caching, rate limiting and the
//! third-party catalog clients.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Rate limiting via governor
//! - `external` - TMDB and Spotify clients via reqwest

pub mod cache;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

#[cfg(feature = "external")]
pub mod external;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, connect};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{KeyedRateLimiter, RateLimitConfig};

#[cfg(feature = "external")]
pub use external::{SpotifyClient, SpotifyConfig, TmdbClient, TmdbConfig};
