//! Catalog entities (movies, songs, albums) and the per-couple wish-lists
//! that reference them.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Status of a list entry. Each media kind has its own small set.
pub trait ListStatus:
    Copy
    + Default
    + Eq
    + Hash
    + Debug
    + Display
    + FromStr<Err = String>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Accepted wire values, used in error messages.
    const VALUES: &'static [&'static str];
}

/// A catalog row describing external content.
pub trait MediaItem: Clone + Debug + Serialize + Send + Sync + 'static {
    type Status: ListStatus;

    /// Human-readable singular name, e.g. `"movie"`.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Id in the third-party catalog (TMDB or Spotify).
    fn external_id(&self) -> &str;

    fn title(&self) -> &str;

    /// Whether this item satisfies a catalog browsing query.
    fn matches(&self, query: &CatalogQuery) -> bool;

    /// The catalog album this item belongs to, if any.
    fn album_id(&self) -> Option<Uuid> {
        None
    }
}

fn invalid_status<S: ListStatus>(value: &str) -> String {
    format!(
        "invalid status '{}', expected one of: {}",
        value,
        S::VALUES.join(", ")
    )
}

/// Movie list status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieStatus {
    #[default]
    Pending,
    Watched,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::Pending => "pending",
            MovieStatus::Watched => "watched",
        }
    }
}

impl Display for MovieStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MovieStatus::Pending),
            "watched" => Ok(MovieStatus::Watched),
            other => Err(invalid_status::<Self>(other)),
        }
    }
}

impl ListStatus for MovieStatus {
    const VALUES: &'static [&'static str] = &["pending", "watched"];
}

/// Song list status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SongStatus {
    #[default]
    Saved,
    Favorite,
}

impl SongStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongStatus::Saved => "saved",
            SongStatus::Favorite => "favorite",
        }
    }
}

impl Display for SongStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SongStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saved" => Ok(SongStatus::Saved),
            "favorite" => Ok(SongStatus::Favorite),
            other => Err(invalid_status::<Self>(other)),
        }
    }
}

impl ListStatus for SongStatus {
    const VALUES: &'static [&'static str] = &["saved", "favorite"];
}

/// Album list status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumStatus {
    #[default]
    Pending,
    Listened,
}

impl AlbumStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlbumStatus::Pending => "pending",
            AlbumStatus::Listened => "listened",
        }
    }
}

impl Display for AlbumStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlbumStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AlbumStatus::Pending),
            "listened" => Ok(AlbumStatus::Listened),
            other => Err(invalid_status::<Self>(other)),
        }
    }
}

impl ListStatus for AlbumStatus {
    const VALUES: &'static [&'static str] = &["pending", "listened"];
}

/// Movie cached from TMDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub tmdb_id: String,
    pub title: String,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub poster_path: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl MediaItem for Movie {
    type Status = MovieStatus;
    const KIND: &'static str = "movie";

    fn id(&self) -> Uuid {
        self.id
    }

    fn external_id(&self) -> &str {
        &self.tmdb_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn matches(&self, query: &CatalogQuery) -> bool {
        query.matches(&self.title, self.director.as_deref(), self.genre.as_deref())
    }
}

/// Song cached from Spotify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub spotify_id: String,
    pub title: String,
    pub artist: String,
    pub genre: Option<String>,
    pub duration_ms: Option<i32>,
    pub image: Option<String>,
    pub album_id: Option<Uuid>,
}

impl MediaItem for Song {
    type Status = SongStatus;
    const KIND: &'static str = "song";

    fn id(&self) -> Uuid {
        self.id
    }

    fn external_id(&self) -> &str {
        &self.spotify_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn matches(&self, query: &CatalogQuery) -> bool {
        query.matches(&self.title, Some(&self.artist), Some(&self.artist))
    }

    fn album_id(&self) -> Option<Uuid> {
        self.album_id
    }
}

/// Album cached from Spotify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub spotify_id: String,
    pub title: String,
    pub artist: String,
    pub genre: Option<String>,
    pub track_count: Option<i32>,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl MediaItem for Album {
    type Status = AlbumStatus;
    const KIND: &'static str = "album";

    fn id(&self) -> Uuid {
        self.id
    }

    fn external_id(&self) -> &str {
        &self.spotify_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn matches(&self, query: &CatalogQuery) -> bool {
        query.matches(&self.title, Some(&self.artist), Some(&self.artist))
    }
}

/// A catalog item on a couple's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry<S> {
    pub id: Uuid,
    pub couple_id: Uuid,
    pub item_id: Uuid,
    pub status: S,
    pub added_at: DateTime<Utc>,
}

impl<S: ListStatus> ListEntry<S> {
    pub fn new(couple_id: Uuid, item_id: Uuid, status: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            couple_id,
            item_id,
            status,
            added_at: Utc::now(),
        }
    }
}

/// A list entry joined with its catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct ListedItem<M: MediaItem> {
    pub entry: ListEntry<M::Status>,
    pub item: M,
}

/// Catalog browsing query.
///
/// `search` matches the title or the secondary field (director for movies,
/// artist for music). `filter` narrows by genre for movies and by artist for
/// songs and albums. Both are case-insensitive substring matches.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub filter: Option<String>,
}

impl CatalogQuery {
    fn contains(haystack: Option<&str>, needle: &str) -> bool {
        haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
    }

    /// Evaluate the query against a title, a secondary searchable field and
    /// the filter field.
    pub fn matches(&self, title: &str, secondary: Option<&str>, filtered: Option<&str>) -> bool {
        let search_ok = self.search.as_deref().is_none_or(|s| {
            Self::contains(Some(title), s) || Self::contains(secondary, s)
        });
        let filter_ok = self
            .filter
            .as_deref()
            .is_none_or(|f| Self::contains(filtered, f));
        search_ok && filter_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_their_wire_values() {
        assert_eq!(
            "watched".parse::<MovieStatus>().unwrap(),
            MovieStatus::Watched
        );
        assert_eq!(
            "favorite".parse::<SongStatus>().unwrap(),
            SongStatus::Favorite
        );
        assert_eq!(
            "listened".parse::<AlbumStatus>().unwrap(),
            AlbumStatus::Listened
        );

        let err = "vista".parse::<MovieStatus>().unwrap_err();
        assert!(err.contains("pending, watched"));
    }

    #[test]
    fn status_defaults() {
        assert_eq!(MovieStatus::default(), MovieStatus::Pending);
        assert_eq!(SongStatus::default(), SongStatus::Saved);
        assert_eq!(AlbumStatus::default(), AlbumStatus::Pending);
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&SongStatus::Favorite).unwrap();
        assert_eq!(json, "\"favorite\"");
    }

    #[test]
    fn catalog_query_matching() {
        let q = CatalogQuery {
            search: Some("nolan".to_string()),
            filter: None,
        };
        assert!(q.matches("Inception", Some("Christopher Nolan"), None));
        assert!(!q.matches("Amelie", Some("Jean-Pierre Jeunet"), None));

        let q = CatalogQuery {
            search: None,
            filter: Some("drama".to_string()),
        };
        assert!(q.matches("Amelie", None, Some("Comedy, Drama")));
        assert!(!q.matches("Amelie", None, None));
    }
}
