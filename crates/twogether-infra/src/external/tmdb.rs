//! TMDB (The Movie Database) client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use twogether_core::ports::{CatalogError, MovieCatalog, MovieDetails, MoviePage, MovieSummary};

use super::{Named, decode, http_client, join_names, transport};

const SERVICE: &str = "TMDB";
const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Prefix for poster paths.
    pub image_base_url: String,
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            language: "es-MX".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    id: i64,
    title: String,
    original_title: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    popularity: Option<f64>,
    vote_average: Option<f64>,
    #[serde(default)]
    genre_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    page: u32,
    total_pages: u32,
    #[serde(default)]
    total_results: u64,
    results: Vec<RawMovie>,
}

#[derive(Debug, Deserialize)]
struct CrewMember {
    name: String,
    job: String,
}

#[derive(Debug, Default, Deserialize)]
struct Credits {
    #[serde(default)]
    crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    id: i64,
    title: String,
    original_title: Option<String>,
    overview: Option<String>,
    runtime: Option<i32>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    budget: Option<i64>,
    revenue: Option<i64>,
    original_language: Option<String>,
    #[serde(default)]
    genres: Vec<Named>,
    #[serde(default)]
    production_companies: Vec<Named>,
    #[serde(default)]
    credits: Credits,
}

pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; movie search is disabled");
        }
        Ok(Self {
            http: http_client()?,
            config,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CatalogError::NotConfigured(SERVICE))?;

        let response = self
            .http
            .get(format!("{}{}", self.config.base_url, path))
            .query(&[
                ("api_key", api_key),
                ("language", self.config.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| transport(SERVICE, e))?;

        decode(SERVICE, response).await
    }

    fn poster(&self, path: Option<String>) -> Option<String> {
        path.map(|p| format!("{}{}", self.config.image_base_url, p))
    }

    fn map_summary(&self, raw: RawMovie) -> MovieSummary {
        MovieSummary {
            tmdb_id: raw.id.to_string(),
            title: raw.title,
            original_title: raw.original_title,
            overview: raw.overview,
            poster_url: self.poster(raw.poster_path),
            backdrop_url: backdrop(raw.backdrop_path),
            release_date: non_empty(raw.release_date),
            popularity: raw.popularity,
            vote_average: raw.vote_average,
            genre_ids: raw.genre_ids,
        }
    }

    fn map_page(&self, raw: RawPage) -> MoviePage {
        MoviePage {
            page: raw.page,
            total_pages: raw.total_pages,
            total_results: raw.total_results,
            movies: raw
                .results
                .into_iter()
                .map(|m| self.map_summary(m))
                .collect(),
        }
    }

    fn map_details(&self, raw: RawDetails) -> MovieDetails {
        let director = raw
            .credits
            .crew
            .into_iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name);
        let genre = (!raw.genres.is_empty()).then(|| join_names(&raw.genres));

        MovieDetails {
            tmdb_id: raw.id.to_string(),
            title: raw.title,
            original_title: raw.original_title,
            overview: raw.overview,
            director,
            genre,
            runtime_minutes: raw.runtime,
            poster_url: self.poster(raw.poster_path),
            backdrop_url: backdrop(raw.backdrop_path),
            release_date: non_empty(raw.release_date),
            vote_average: raw.vote_average,
            budget: raw.budget,
            revenue: raw.revenue,
            original_language: raw.original_language,
            production_companies: raw
                .production_companies
                .into_iter()
                .map(|c| c.name)
                .collect(),
        }
    }
}

fn backdrop(path: Option<String>) -> Option<String> {
    path.map(|p| format!("{BACKDROP_BASE_URL}{p}"))
}

/// TMDB sends `""` for unknown release dates.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        let raw: RawPage = self
            .get(
                "/search/movie",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;
        Ok(self.map_page(raw))
    }

    async fn popular(&self, page: u32) -> Result<MoviePage, CatalogError> {
        let raw: RawPage = self
            .get("/movie/popular", &[("page", page.to_string())])
            .await?;
        Ok(self.map_page(raw))
    }

    async fn details(&self, tmdb_id: &str) -> Result<MovieDetails, CatalogError> {
        let raw: RawDetails = self
            .get(
                &format!("/movie/{tmdb_id}"),
                &[("append_to_response", "credits".to_string())],
            )
            .await?;
        Ok(self.map_details(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(TmdbConfig::default()).unwrap()
    }

    #[test]
    fn search_page_is_mapped() {
        let raw: RawPage = serde_json::from_str(
            r#"{
                "page": 1,
                "total_pages": 3,
                "total_results": 42,
                "results": [{
                    "id": 27205,
                    "title": "El origen",
                    "original_title": "Inception",
                    "overview": "Un ladrón...",
                    "poster_path": "/poster.jpg",
                    "backdrop_path": null,
                    "release_date": "2010-07-15",
                    "popularity": 83.9,
                    "vote_average": 8.4,
                    "genre_ids": [28, 878]
                }]
            }"#,
        )
        .unwrap();

        let page = client().map_page(raw);
        let movie = &page.movies[0];
        assert_eq!(page.total_results, 42);
        assert_eq!(movie.tmdb_id, "27205");
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(movie.backdrop_url, None);
        assert_eq!(movie.genre_ids, vec![28, 878]);
    }

    #[test]
    fn details_pick_director_and_join_genres() {
        let raw: RawDetails = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "Matrix",
                "runtime": 136,
                "release_date": "",
                "backdrop_path": "/bd.jpg",
                "genres": [{"id": 28, "name": "Acción"}, {"id": 878, "name": "Ciencia ficción"}],
                "production_companies": [{"name": "Warner Bros."}],
                "credits": {"crew": [
                    {"name": "Bill Pope", "job": "Director of Photography"},
                    {"name": "Lana Wachowski", "job": "Director"}
                ]}
            }"#,
        )
        .unwrap();

        let details = client().map_details(raw);
        assert_eq!(details.director.as_deref(), Some("Lana Wachowski"));
        assert_eq!(details.genre.as_deref(), Some("Acción, Ciencia ficción"));
        assert_eq!(details.runtime_minutes, Some(136));
        assert_eq!(details.release_date, None);
        assert_eq!(
            details.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/bd.jpg")
        );
        assert_eq!(details.production_companies, vec!["Warner Bros."]);
    }

    #[tokio::test]
    async fn missing_key_is_reported_before_any_request() {
        let result = client().search("matrix", 1).await;
        assert!(matches!(result, Err(CatalogError::NotConfigured("TMDB"))));
    }
}
