//! Shared fixtures: an in-memory app state with canned catalogs, plus
//! shortcuts for registering and linking users.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use api_server::state::{AppState, Repositories};
use twogether_core::ports::{
    AlbumDetails, AlbumSummary, CatalogError, MovieCatalog, MovieDetails, MoviePage,
    MovieSummary, MusicCatalog, RateLimiter, SearchPage, TokenService, Track,
};
use twogether_core::services::NewAccount;
use twogether_infra::{JwtConfig, JwtTokenService, KeyedRateLimiter, RateLimitConfig};

/// Build the full app over `$state`, the way `main` does.
macro_rules! test_app {
    ($state:expr) => {{
        let state: api_server::state::AppState = $state.clone();
        let limiter = state.limiter.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(state))
                .configure(|cfg| api_server::handlers::configure_routes(cfg, limiter))
                .default_service(actix_web::web::to(api_server::handlers::not_found)),
        )
        .await
    }};
}

pub struct CannedMovies;

fn inception() -> MovieSummary {
    MovieSummary {
        tmdb_id: "27205".to_string(),
        title: "Inception".to_string(),
        original_title: Some("Inception".to_string()),
        overview: None,
        poster_url: Some("https://image.tmdb.org/t/p/w500/inception.jpg".to_string()),
        backdrop_url: None,
        release_date: Some("2010-07-15".to_string()),
        popularity: Some(90.5),
        vote_average: Some(8.4),
        genre_ids: vec![28, 878],
    }
}

#[async_trait]
impl MovieCatalog for CannedMovies {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        let movies = if "inception".contains(&query.to_lowercase()) {
            vec![inception()]
        } else {
            Vec::new()
        };
        Ok(MoviePage {
            total_results: movies.len() as u64,
            movies,
            page,
            total_pages: 1,
        })
    }

    async fn popular(&self, _page: u32) -> Result<MoviePage, CatalogError> {
        Err(CatalogError::Upstream("TMDB returned 500".to_string()))
    }

    async fn details(&self, tmdb_id: &str) -> Result<MovieDetails, CatalogError> {
        if tmdb_id != "27205" {
            return Err(CatalogError::NotFound(format!("movie {tmdb_id}")));
        }
        Ok(MovieDetails {
            tmdb_id: tmdb_id.to_string(),
            title: "Inception".to_string(),
            original_title: None,
            overview: None,
            director: Some("Christopher Nolan".to_string()),
            genre: Some("Action, Science Fiction".to_string()),
            runtime_minutes: Some(148),
            poster_url: None,
            backdrop_url: None,
            release_date: None,
            vote_average: None,
            budget: None,
            revenue: None,
            original_language: Some("en".to_string()),
            production_companies: vec!["Legendary Pictures".to_string()],
        })
    }
}

/// Spotify without credentials.
pub struct UnconfiguredMusic;

#[async_trait]
impl MusicCatalog for UnconfiguredMusic {
    async fn search_tracks(
        &self,
        _query: &str,
        _limit: u32,
        _offset: u32,
    ) -> Result<SearchPage<Track>, CatalogError> {
        Err(CatalogError::NotConfigured("Spotify"))
    }

    async fn track(&self, _spotify_id: &str) -> Result<Track, CatalogError> {
        Err(CatalogError::NotConfigured("Spotify"))
    }

    async fn search_albums(
        &self,
        _query: &str,
        _limit: u32,
        _offset: u32,
    ) -> Result<SearchPage<AlbumSummary>, CatalogError> {
        Err(CatalogError::NotConfigured("Spotify"))
    }

    async fn album(&self, _spotify_id: &str) -> Result<AlbumDetails, CatalogError> {
        Err(CatalogError::NotConfigured("Spotify"))
    }

    async fn popular_tracks(&self, _country: &str) -> Result<Vec<Track>, CatalogError> {
        Err(CatalogError::NotConfigured("Spotify"))
    }
}

/// App state over a fresh in-memory store, allowing `max_auth_requests`
/// auth calls per minute.
pub fn state_with_limit(max_auth_requests: u32) -> AppState {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        ..JwtConfig::default()
    }));
    let limiter: Arc<dyn RateLimiter> = Arc::new(
        KeyedRateLimiter::new(RateLimitConfig {
            max_requests: max_auth_requests,
            window: Duration::from_secs(60),
        })
        .unwrap(),
    );

    AppState::with_catalogs(
        Repositories::in_memory(),
        tokens,
        limiter,
        Arc::new(CannedMovies),
        Arc::new(UnconfiguredMusic),
    )
}

pub fn test_state() -> AppState {
    state_with_limit(1_000)
}

pub struct Member {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub invite_code: String,
}

impl Member {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

/// Register a user directly through the service layer.
pub async fn member(state: &AppState, name: &str) -> Member {
    let email = format!("{}@example.com", name.to_lowercase());
    let registration = state
        .auth
        .register(NewAccount {
            name: name.to_string(),
            email: email.clone(),
            password: "secret123".to_string(),
            profile_photo: None,
        })
        .await
        .unwrap();

    Member {
        id: registration.user.id,
        email,
        token: registration.token,
        invite_code: registration.invite_code,
    }
}

/// Two users, the second linked to the first one's couple.
pub async fn linked_pair(state: &AppState) -> (Member, Member) {
    let owner = member(state, "Ana").await;
    let partner = member(state, "Luis").await;
    state
        .couples
        .link(partner.id, &owner.invite_code)
        .await
        .unwrap();
    (owner, partner)
}
