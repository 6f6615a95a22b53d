//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use twogether_infra::{JwtConfig, RateLimitConfig, SpotifyConfig, TmdbConfig};

/// Connection settings for the relational store.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtConfig,
    /// Origin allowed by CORS, with credentials.
    pub frontend_url: String,
    pub rate_limit: RateLimitConfig,
    pub tmdb: TmdbConfig,
    pub spotify: SpotifyConfig,
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = non_empty("DATABASE_URL").map(|url| DatabaseSettings {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(2),
        });

        let rate_defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: parsed("RATE_LIMIT_MAX_REQUESTS").unwrap_or(rate_defaults.max_requests),
            window: parsed("RATE_LIMIT_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(rate_defaults.window),
        };

        let tmdb_defaults = TmdbConfig::default();
        let tmdb = TmdbConfig {
            api_key: non_empty("TMDB_API_KEY"),
            base_url: non_empty("TMDB_BASE_URL").unwrap_or(tmdb_defaults.base_url),
            image_base_url: non_empty("TMDB_IMAGE_BASE_URL")
                .unwrap_or(tmdb_defaults.image_base_url),
            language: non_empty("TMDB_LANGUAGE").unwrap_or(tmdb_defaults.language),
        };

        let spotify_defaults = SpotifyConfig::default();
        let spotify = SpotifyConfig {
            client_id: non_empty("SPOTIFY_CLIENT_ID"),
            client_secret: non_empty("SPOTIFY_CLIENT_SECRET"),
            base_url: non_empty("SPOTIFY_BASE_URL").unwrap_or(spotify_defaults.base_url),
            accounts_url: non_empty("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or(spotify_defaults.accounts_url),
            market: non_empty("SPOTIFY_MARKET").unwrap_or(spotify_defaults.market),
            ..spotify_defaults
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(5000),
            database,
            jwt: JwtConfig::from_env(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            rate_limit,
            tmdb,
            spotify,
        }
    }
}
