//! HTTP adapters for the third-party catalogs.

mod spotify;
mod tmdb;

pub use spotify::{SpotifyClient, SpotifyConfig};
pub use tmdb::{TmdbClient, TmdbConfig};

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use twogether_core::ports::CatalogError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn http_client() -> Result<Client, CatalogError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| CatalogError::Upstream(e.to_string()))
}

/// Check the status of an upstream response and decode its body.
async fn decode<T: DeserializeOwned>(service: &str, response: Response) -> Result<T, CatalogError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(format!(
            "{service}: {}",
            response.url().path()
        )));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(service, %status, body = %body, "Upstream request failed");
        return Err(CatalogError::Upstream(format!("{service} returned {status}")));
    }
    response
        .json()
        .await
        .map_err(|e| CatalogError::Upstream(format!("{service} sent an unreadable body: {e}")))
}

fn transport(service: &str, err: reqwest::Error) -> CatalogError {
    CatalogError::Upstream(format!("{service} unreachable: {err}"))
}

/// `{ "name": ... }` objects (genres, companies, artists).
#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

fn join_names(names: &[Named]) -> String {
    names
        .iter()
        .map(|n| n.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
