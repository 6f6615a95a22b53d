//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod catalog;
mod rate_limit;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use cache::{Cache, CacheError};
pub use catalog::{
    AlbumDetails, AlbumSummary, AlbumTrack, CatalogError, MovieCatalog, MovieDetails, MoviePage,
    MovieSummary, MusicCatalog, SearchPage, Track,
};
pub use rate_limit::{Decision, RateLimitError, RateLimiter};
pub use repository::{
    BaseRepository, CoupleRepository, DateRepository, MediaRepository, NoteRepository,
    UserRepository,
};
