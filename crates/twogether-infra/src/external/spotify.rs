//! Spotify Web API client (client-credentials grant).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use twogether_core::ports::{
    AlbumDetails, AlbumSummary, AlbumTrack, Cache, CatalogError, MusicCatalog, SearchPage, Track,
};

use super::{Named, decode, http_client, join_names, transport};

const SERVICE: &str = "Spotify";
const TOKEN_CACHE_KEY: &str = "spotify:access_token";
/// Tokens live one hour; refresh a little early.
const TOKEN_TTL: Duration = Duration::from_secs(55 * 60);

/// Public playlists tried in order for popular tracks: Top 50 Global,
/// Top 50 Mexico, Today's Top Hits.
const POPULAR_PLAYLISTS: [&str; 3] = [
    "37i9dQZEVXbMDoHDwVN2tF",
    "37i9dQZEVXbO3qyFxbkOE1",
    "37i9dQZF1DXcBWIGoYBM5M",
];
const POPULAR_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub base_url: String,
    pub accounts_url: String,
    pub market: String,
    /// How long a fetched access token is reused.
    pub token_ttl: Duration,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: "https://api.spotify.com/v1".to_string(),
            accounts_url: "https://accounts.spotify.com/api/token".to_string(),
            market: "MX".to_string(),
            token_ttl: TOKEN_TTL,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlbumRef {
    id: Option<String>,
    name: String,
    #[serde(default)]
    images: Vec<Image>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    /// Null for local files inside playlists.
    id: Option<String>,
    name: String,
    #[serde(default)]
    artists: Vec<Named>,
    album: Option<AlbumRef>,
    duration_ms: Option<i64>,
    preview_url: Option<String>,
    popularity: Option<i64>,
    #[serde(default)]
    external_urls: ExternalUrls,
    track_number: Option<i64>,
    explicit: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct AlbumTrackItem {
    id: String,
    name: String,
    track_number: Option<i64>,
    duration_ms: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawAlbum {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<Named>,
    album_type: Option<String>,
    total_tracks: Option<i64>,
    #[serde(default)]
    images: Vec<Image>,
    release_date: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[serde(default)]
    genres: Vec<String>,
    label: Option<String>,
    popularity: Option<i64>,
    tracks: Option<Paging<AlbumTrackItem>>,
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
    items: Vec<T>,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct TrackSearch {
    tracks: Paging<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct AlbumSearch {
    albums: Paging<RawAlbum>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    track: Option<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct PlaylistTracks {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct Recommendations {
    #[serde(default)]
    tracks: Vec<RawTrack>,
}

fn to_track(raw: RawTrack) -> Option<Track> {
    let spotify_id = raw.id?;
    let (album, album_id, image, release_date) = match raw.album {
        Some(album) => (
            Some(album.name),
            album.id,
            album.images.into_iter().next().map(|i| i.url),
            album.release_date,
        ),
        None => (None, None, None, None),
    };

    Some(Track {
        spotify_id,
        title: raw.name,
        artist: join_names(&raw.artists),
        album,
        album_id,
        duration_ms: raw.duration_ms,
        image,
        preview_url: raw.preview_url,
        release_date,
        popularity: raw.popularity,
        spotify_url: raw.external_urls.spotify,
        track_number: raw.track_number,
        explicit: raw.explicit,
    })
}

fn to_album_summary(raw: &mut RawAlbum) -> AlbumSummary {
    AlbumSummary {
        spotify_id: std::mem::take(&mut raw.id),
        title: std::mem::take(&mut raw.name),
        artist: join_names(&raw.artists),
        album_type: raw.album_type.take(),
        track_count: raw.total_tracks,
        image: raw.images.drain(..).next().map(|i| i.url),
        release_date: raw.release_date.take(),
        spotify_url: raw.external_urls.spotify.take(),
    }
}

fn to_album_details(mut raw: RawAlbum) -> AlbumDetails {
    let summary = to_album_summary(&mut raw);
    let tracks = raw
        .tracks
        .map(|page| {
            page.items
                .into_iter()
                .map(|t| AlbumTrack {
                    number: t.track_number,
                    title: t.name,
                    duration_ms: t.duration_ms,
                    spotify_id: t.id,
                })
                .collect()
        })
        .unwrap_or_default();

    AlbumDetails {
        summary,
        genre: (!raw.genres.is_empty()).then(|| raw.genres.join(", ")),
        label: raw.label,
        popularity: raw.popularity,
        tracks,
    }
}

/// Spotify catalog access with a cached application token.
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
    tokens: Arc<dyn Cache>,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig, tokens: Arc<dyn Cache>) -> Result<Self, CatalogError> {
        if config.client_id.is_none() || config.client_secret.is_none() {
            tracing::warn!("Spotify credentials are not set; music search is disabled");
        }
        Ok(Self {
            http: http_client()?,
            config,
            tokens,
        })
    }

    /// A valid access token, fetched again once the cached one expires.
    async fn access_token(&self) -> Result<String, CatalogError> {
        if let Some(token) = self.tokens.get(TOKEN_CACHE_KEY).await {
            return Ok(token);
        }

        let (Some(client_id), Some(client_secret)) =
            (&self.config.client_id, &self.config.client_secret)
        else {
            return Err(CatalogError::NotConfigured(SERVICE));
        };

        let response = self
            .http
            .post(&self.config.accounts_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| transport(SERVICE, e))?;
        let token: TokenResponse = decode(SERVICE, response).await?;

        if let Err(e) = self
            .tokens
            .set(
                TOKEN_CACHE_KEY,
                &token.access_token,
                Some(self.config.token_ttl),
            )
            .await
        {
            tracing::warn!(error = %e, "Could not cache Spotify token");
        }
        tracing::debug!("Spotify access token refreshed");
        Ok(token.access_token)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!("{}{}", self.config.base_url, path))
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| transport(SERVICE, e))?;
        decode(SERVICE, response).await
    }

    fn market(&self) -> (&'static str, String) {
        ("market", self.config.market.clone())
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        country: &str,
    ) -> Result<Vec<Track>, CatalogError> {
        let playlist: PlaylistTracks = self
            .get(
                &format!("/playlists/{playlist_id}/tracks"),
                &[
                    ("limit", POPULAR_LIMIT.to_string()),
                    ("market", country.to_string()),
                ],
            )
            .await?;
        Ok(playlist
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(to_track))
            .collect())
    }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage<Track>, CatalogError> {
        let found: TrackSearch = self
            .get(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                    self.market(),
                ],
            )
            .await?;

        Ok(SearchPage {
            items: found
                .tracks
                .items
                .into_iter()
                .filter_map(to_track)
                .collect(),
            total: found.tracks.total,
            limit,
            offset,
        })
    }

    async fn track(&self, spotify_id: &str) -> Result<Track, CatalogError> {
        let raw: RawTrack = self
            .get(&format!("/tracks/{spotify_id}"), &[self.market()])
            .await?;
        to_track(raw).ok_or_else(|| CatalogError::NotFound(format!("track {spotify_id}")))
    }

    async fn search_albums(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage<AlbumSummary>, CatalogError> {
        let found: AlbumSearch = self
            .get(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "album".to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                    self.market(),
                ],
            )
            .await?;

        Ok(SearchPage {
            items: found
                .albums
                .items
                .into_iter()
                .map(|mut raw| to_album_summary(&mut raw))
                .collect(),
            total: found.albums.total,
            limit,
            offset,
        })
    }

    async fn album(&self, spotify_id: &str) -> Result<AlbumDetails, CatalogError> {
        let raw: RawAlbum = self
            .get(&format!("/albums/{spotify_id}"), &[self.market()])
            .await?;
        Ok(to_album_details(raw))
    }

    /// First non-empty playlist wins; recommendations are the fallback.
    async fn popular_tracks(&self, country: &str) -> Result<Vec<Track>, CatalogError> {
        for playlist_id in POPULAR_PLAYLISTS {
            match self.playlist_tracks(playlist_id, country).await {
                Ok(tracks) if !tracks.is_empty() => return Ok(tracks),
                Ok(_) => tracing::debug!(playlist_id, "Playlist is empty"),
                Err(CatalogError::NotConfigured(service)) => {
                    return Err(CatalogError::NotConfigured(service));
                }
                Err(e) => tracing::warn!(playlist_id, error = %e, "Playlist lookup failed"),
            }
        }

        let recommended: Recommendations = self
            .get(
                "/recommendations",
                &[
                    ("limit", POPULAR_LIMIT.to_string()),
                    ("market", country.to_string()),
                    ("seed_genres", "pop,latin,reggaeton".to_string()),
                    ("min_popularity", "70".to_string()),
                ],
            )
            .await?;
        Ok(recommended
            .tracks
            .into_iter()
            .filter_map(to_track)
            .collect())
    }
}
