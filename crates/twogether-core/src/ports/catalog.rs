//! Third-party content catalogs (TMDB for movies, Spotify for music).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A movie as returned by search and popular listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub tmdb_id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

/// Full movie record including credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub tmdb_id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub director: Option<String>,
    /// Genre names joined by ", ".
    pub genre: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub budget: Option<i64>,
    pub revenue: Option<i64>,
    pub original_language: Option<String>,
    pub production_companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<MovieSummary>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

/// A Spotify track. Detail lookups fill the optional trailing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub spotify_id: String,
    pub title: String,
    /// Artist names joined by ", ".
    pub artist: String,
    pub album: Option<String>,
    pub album_id: Option<String>,
    pub duration_ms: Option<i64>,
    pub image: Option<String>,
    pub preview_url: Option<String>,
    pub release_date: Option<String>,
    pub popularity: Option<i64>,
    pub spotify_url: Option<String>,
    pub track_number: Option<i64>,
    pub explicit: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub spotify_id: String,
    pub title: String,
    pub artist: String,
    pub album_type: Option<String>,
    pub track_count: Option<i64>,
    pub image: Option<String>,
    pub release_date: Option<String>,
    pub spotify_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub number: Option<i64>,
    pub title: String,
    pub duration_ms: Option<i64>,
    pub spotify_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetails {
    #[serde(flatten)]
    pub summary: AlbumSummary,
    pub genre: Option<String>,
    pub label: Option<String>,
    pub popularity: Option<i64>,
    pub tracks: Vec<AlbumTrack>,
}

/// One page of an offset-paged upstream search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError>;

    async fn popular(&self, page: u32) -> Result<MoviePage, CatalogError>;

    /// Movie details with the director taken from the credits.
    async fn details(&self, tmdb_id: &str) -> Result<MovieDetails, CatalogError>;
}

#[async_trait]
pub trait MusicCatalog: Send + Sync {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage<Track>, CatalogError>;

    async fn track(&self, spotify_id: &str) -> Result<Track, CatalogError>;

    async fn search_albums(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage<AlbumSummary>, CatalogError>;

    async fn album(&self, spotify_id: &str) -> Result<AlbumDetails, CatalogError>;

    /// Currently popular tracks for a market.
    async fn popular_tracks(&self, country: &str) -> Result<Vec<Track>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} credentials are not configured")]
    NotConfigured(&'static str),

    #[error("Not found upstream: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}
