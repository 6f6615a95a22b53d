use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use twogether_core::domain::{
    Album, AlbumStatus, CatalogQuery, ListStatus, ListedItem, MediaItem, Movie, MovieStatus,
    PageRequest, Song, SongStatus,
};

use super::{page_request, present};

/// TMDB ids arrive as numbers from most clients; accept either form.
fn external_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMovieRequest {
    #[serde(default, deserialize_with = "external_id")]
    #[validate(length(min = 1, message = "tmdb_id is required"))]
    pub tmdb_id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    pub director: Option<String>,
    pub genre: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub poster_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub status: Option<MovieStatus>,
}

impl AddMovieRequest {
    pub fn into_parts(self) -> (Movie, Option<MovieStatus>) {
        let movie = Movie {
            id: Uuid::new_v4(),
            tmdb_id: self.tmdb_id,
            title: self.title,
            director: self.director,
            genre: self.genre,
            runtime_minutes: self.runtime_minutes,
            poster_path: self.poster_path,
            release_date: self.release_date,
        };
        (movie, self.status)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddSongRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "spotify_id is required"))]
    pub spotify_id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Artist is required"))]
    pub artist: String,

    pub genre: Option<String>,
    pub duration_ms: Option<i32>,
    pub image: Option<String>,
    pub album_id: Option<Uuid>,
    pub status: Option<SongStatus>,
}

impl AddSongRequest {
    pub fn into_parts(self) -> (Song, Option<SongStatus>) {
        let song = Song {
            id: Uuid::new_v4(),
            spotify_id: self.spotify_id,
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            duration_ms: self.duration_ms,
            image: self.image,
            album_id: self.album_id,
        };
        (song, self.status)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddAlbumRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "spotify_id is required"))]
    pub spotify_id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Artist is required"))]
    pub artist: String,

    pub genre: Option<String>,
    pub track_count: Option<i32>,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub status: Option<AlbumStatus>,
}

impl AddAlbumRequest {
    pub fn into_parts(self) -> (Album, Option<AlbumStatus>) {
        let album = Album {
            id: Uuid::new_v4(),
            spotify_id: self.spotify_id,
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            track_count: self.track_count,
            image: self.image,
            release_date: self.release_date,
        };
        (album, self.status)
    }
}

/// Body of a status change. Parsed against the media kind's own statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub status: String,
}

impl StatusRequest {
    pub fn parse<S: ListStatus>(&self) -> Result<S, String> {
        self.status.trim().parse()
    }
}

/// `GET /movies` style list query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListQuery {
    /// A blank status means no filter; an unknown one is an error.
    pub fn status<S: ListStatus>(&self) -> Result<Option<S>, String> {
        present(&self.status).map(str::parse).transpose()
    }

    pub fn page(&self) -> PageRequest {
        page_request(self.limit, self.offset)
    }
}

/// Public catalog browsing query. `filter` may also be sent as `genre`
/// (movies) or `artist` (music).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogParams {
    pub search: Option<String>,
    #[serde(alias = "genre", alias = "artist")]
    pub filter: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl CatalogParams {
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            search: present(&self.search).map(str::to_string),
            filter: present(&self.filter).map(str::to_string),
        }
    }

    pub fn page(&self) -> PageRequest {
        page_request(self.limit, self.offset)
    }
}

/// A list entry with its catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct ListEntryResponse<M: MediaItem> {
    pub id: Uuid,
    pub status: M::Status,
    pub added_at: DateTime<Utc>,
    pub item: M,
}

impl<M: MediaItem> From<ListedItem<M>> for ListEntryResponse<M> {
    fn from(listed: ListedItem<M>) -> Self {
        Self {
            id: listed.entry.id,
            status: listed.entry.status,
            added_at: listed.entry.added_at,
            item: listed.item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tmdb_id_is_accepted() {
        let req: AddMovieRequest =
            serde_json::from_str(r#"{"tmdb_id": 27205, "title": "Inception"}"#).unwrap();
        assert_eq!(req.tmdb_id, "27205");
        assert!(req.validate().is_ok());

        let (movie, status) = req.into_parts();
        assert_eq!(movie.tmdb_id, "27205");
        assert_eq!(status, None);
    }

    #[test]
    fn music_needs_an_artist() {
        let req: AddSongRequest =
            serde_json::from_str(r#"{"spotify_id": "abc", "title": "Tusa"}"#).unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("artist"));
    }

    #[test]
    fn status_is_parsed_per_kind() {
        let req = StatusRequest {
            status: "favorite".to_string(),
        };
        assert_eq!(req.parse::<SongStatus>(), Ok(SongStatus::Favorite));
        assert!(req.parse::<AlbumStatus>().is_err());
    }

    #[test]
    fn list_status_filter() {
        let query = ListQuery {
            status: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.status::<MovieStatus>(), Ok(None));

        let query = ListQuery {
            status: Some("watched".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.status::<MovieStatus>(),
            Ok(Some(MovieStatus::Watched))
        );

        let query = ListQuery {
            status: Some("seen".to_string()),
            ..Default::default()
        };
        assert!(query.status::<MovieStatus>().is_err());
    }

    #[test]
    fn catalog_filter_aliases() {
        let params: CatalogParams = serde_json::from_str(r#"{"genre": "Drama"}"#).unwrap();
        assert_eq!(params.query().filter.as_deref(), Some("Drama"));
    }
}
