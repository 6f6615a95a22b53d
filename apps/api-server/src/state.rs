//! Application state - shared across all handlers.

use std::sync::Arc;

use twogether_core::domain::{Album, Movie, Song};
use twogether_core::ports::{
    Cache, CatalogError, CoupleRepository, DateRepository, MediaRepository, MovieCatalog,
    MusicCatalog, NoteRepository, RateLimitError, RateLimiter, TokenService, UserRepository,
};
use twogether_core::services::{AuthService, CoupleService, DateService, MediaService};
use twogether_infra::{
    Argon2PasswordService, InMemoryCache, InMemoryStore, JwtTokenService, KeyedRateLimiter,
    SpotifyClient, TmdbClient,
};

use crate::config::AppConfig;

/// One implementation per repository port.
#[derive(Clone)]
pub struct Repositories {
    /// Which backend is wired in, reported by the health check.
    pub storage: &'static str,
    pub users: Arc<dyn UserRepository>,
    pub couples: Arc<dyn CoupleRepository>,
    pub dates: Arc<dyn DateRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub movies: Arc<dyn MediaRepository<Movie>>,
    pub songs: Arc<dyn MediaRepository<Song>>,
    pub albums: Arc<dyn MediaRepository<Album>>,
}

impl Repositories {
    /// Every port backed by one shared process-local store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            storage: "memory",
            users: Arc::new(store.clone()),
            couples: Arc::new(store.clone()),
            dates: Arc::new(store.clone()),
            notes: Arc::new(store.clone()),
            movies: Arc::new(store.clone()),
            songs: Arc::new(store.clone()),
            albums: Arc::new(store),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(db: twogether_infra::database::DbConn) -> Self {
        use twogether_infra::database::{
            PostgresCoupleRepository, PostgresDateRepository, PostgresMediaRepository,
            PostgresNoteRepository, PostgresUserRepository,
        };

        Self {
            storage: "postgres",
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            couples: Arc::new(PostgresCoupleRepository::new(db.clone())),
            dates: Arc::new(PostgresDateRepository::new(db.clone())),
            notes: Arc::new(PostgresNoteRepository::new(db.clone())),
            movies: Arc::new(PostgresMediaRepository::<Movie>::new(db.clone())),
            songs: Arc::new(PostgresMediaRepository::<Song>::new(db.clone())),
            albums: Arc::new(PostgresMediaRepository::<Album>::new(db)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("rate limiter: {0}")]
    RateLimit(#[from] RateLimitError),
    #[error("catalog client: {0}")]
    Catalog(#[from] CatalogError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub couples: CoupleService,
    pub dates: DateService,
    pub movies: MediaService<Movie>,
    pub songs: MediaService<Song>,
    pub albums: MediaService<Album>,
    pub tmdb: Arc<dyn MovieCatalog>,
    pub spotify: Arc<dyn MusicCatalog>,
    pub tokens: Arc<dyn TokenService>,
    pub limiter: Arc<dyn RateLimiter>,
    pub storage: &'static str,
}

impl AppState {
    /// Wire services, token handling and catalog clients over `repos`.
    pub fn new(repos: Repositories, config: &AppConfig) -> Result<Self, StateError> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let limiter: Arc<dyn RateLimiter> =
            Arc::new(KeyedRateLimiter::new(config.rate_limit.clone())?);
        let token_cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());

        let tmdb: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::new(config.tmdb.clone())?);
        let spotify: Arc<dyn MusicCatalog> =
            Arc::new(SpotifyClient::new(config.spotify.clone(), token_cache)?);

        Ok(Self::with_catalogs(repos, tokens, limiter, tmdb, spotify))
    }

    /// Wire services over explicit collaborators.
    pub fn with_catalogs(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        limiter: Arc<dyn RateLimiter>,
        tmdb: Arc<dyn MovieCatalog>,
        spotify: Arc<dyn MusicCatalog>,
    ) -> Self {
        let auth = AuthService::new(
            repos.users.clone(),
            repos.couples.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
        );

        Self {
            storage: repos.storage,
            auth,
            couples: CoupleService::new(repos.couples.clone(), repos.users.clone()),
            dates: DateService::new(repos.couples.clone(), repos.dates, repos.notes, repos.users),
            movies: MediaService::new(repos.couples.clone(), repos.movies),
            songs: MediaService::new(repos.couples.clone(), repos.songs)
                .with_albums(repos.albums.clone()),
            albums: MediaService::new(repos.couples, repos.albums),
            tmdb,
            spotify,
            tokens,
            limiter,
        }
    }
}
