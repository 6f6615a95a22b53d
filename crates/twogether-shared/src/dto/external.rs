use serde::Deserialize;

use super::present;

pub const DEFAULT_MUSIC_LIMIT: u32 = 20;
pub const MAX_MUSIC_LIMIT: u32 = 50;
pub const DEFAULT_COUNTRY: &str = "MX";

/// TMDB search / popular query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieSearchQuery {
    pub query: Option<String>,
    pub page: Option<u32>,
}

impl MovieSearchQuery {
    pub fn query(&self) -> Option<&str> {
        present(&self.query)
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Spotify search query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MusicSearchQuery {
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl MusicSearchQuery {
    pub fn query(&self) -> Option<&str> {
        present(&self.query)
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_MUSIC_LIMIT)
            .clamp(1, MAX_MUSIC_LIMIT)
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularSongsQuery {
    pub country: Option<String>,
}

impl PopularSongsQuery {
    pub fn country(&self) -> String {
        present(&self.country)
            .map(str::to_uppercase)
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_defaults() {
        let q = MusicSearchQuery::default();
        assert_eq!(q.query(), None);
        assert_eq!(q.limit(), DEFAULT_MUSIC_LIMIT);
        assert_eq!(q.offset(), 0);

        let q = MusicSearchQuery {
            query: Some("karol g".to_string()),
            limit: Some(500),
            offset: Some(40),
        };
        assert_eq!(q.query(), Some("karol g"));
        assert_eq!(q.limit(), MAX_MUSIC_LIMIT);
    }

    #[test]
    fn movie_page_starts_at_one() {
        let q = MovieSearchQuery {
            query: Some("  ".to_string()),
            page: Some(0),
        };
        assert_eq!(q.query(), None);
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn country_defaults_to_mexico() {
        assert_eq!(PopularSongsQuery::default().country(), "MX");
        let q = PopularSongsQuery {
            country: Some("us".to_string()),
        };
        assert_eq!(q.country(), "US");
    }
}
