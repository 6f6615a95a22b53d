use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use twogether_core::domain::{
    Album, CatalogQuery, ListEntry, ListedItem, MediaItem, Movie, Page, PageRequest, Song,
};
use twogether_core::error::RepoError;
use twogether_core::ports::MediaRepository;

use super::store::{InMemoryStore, Tables};

/// Catalog rows and list entries of one media kind.
pub(crate) struct MediaTable<M: MediaItem> {
    items: HashMap<Uuid, M>,
    entries: HashMap<Uuid, ListEntry<M::Status>>,
}

impl<M: MediaItem> Default for MediaTable<M> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            entries: HashMap::new(),
        }
    }
}

impl<M: MediaItem> MediaTable<M> {
    pub(super) fn drop_couple(&mut self, couple_id: Uuid) {
        self.entries.retain(|_, entry| entry.couple_id != couple_id);
    }

    fn listed(&self, entry: &ListEntry<M::Status>) -> Option<ListedItem<M>> {
        let item = self.items.get(&entry.item_id)?.clone();
        Some(ListedItem {
            entry: entry.clone(),
            item,
        })
    }
}

/// Picks the table of a media kind out of the shared tables.
pub(crate) trait StoredMedia: MediaItem {
    fn table(tables: &Tables) -> &MediaTable<Self>;
    fn table_mut(tables: &mut Tables) -> &mut MediaTable<Self>;
}

impl StoredMedia for Movie {
    fn table(tables: &Tables) -> &MediaTable<Self> {
        &tables.movies
    }

    fn table_mut(tables: &mut Tables) -> &mut MediaTable<Self> {
        &mut tables.movies
    }
}

impl StoredMedia for Song {
    fn table(tables: &Tables) -> &MediaTable<Self> {
        &tables.songs
    }

    fn table_mut(tables: &mut Tables) -> &mut MediaTable<Self> {
        &mut tables.songs
    }
}

impl StoredMedia for Album {
    fn table(tables: &Tables) -> &MediaTable<Self> {
        &tables.albums
    }

    fn table_mut(tables: &mut Tables) -> &mut MediaTable<Self> {
        &mut tables.albums
    }
}

#[async_trait]
impl<M: StoredMedia> MediaRepository<M> for InMemoryStore {
    async fn find_item(&self, item_id: Uuid) -> Result<Option<M>, RepoError> {
        let tables = self.tables.read().await;
        Ok(M::table(&tables).items.get(&item_id).cloned())
    }

    async fn find_item_by_external_id(&self, external_id: &str) -> Result<Option<M>, RepoError> {
        let tables = self.tables.read().await;
        Ok(M::table(&tables)
            .items
            .values()
            .find(|item| item.external_id() == external_id)
            .cloned())
    }

    async fn insert_item(&self, item: M) -> Result<M, RepoError> {
        let mut tables = self.tables.write().await;
        if let Some(album_id) = item.album_id() {
            if !tables.albums.items.contains_key(&album_id) {
                return Err(RepoError::Constraint(format!("{} album_id", M::KIND)));
            }
        }
        let table = M::table_mut(&mut tables);
        if table
            .items
            .values()
            .any(|other| other.external_id() == item.external_id())
        {
            return Err(RepoError::Constraint(format!("{} external id", M::KIND)));
        }
        table.items.insert(item.id(), item.clone());
        Ok(item)
    }

    async fn catalog(
        &self,
        query: &CatalogQuery,
        page: PageRequest,
    ) -> Result<Page<M>, RepoError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&M> = M::table(&tables)
            .items
            .values()
            .filter(|item| item.matches(query))
            .collect();
        matching.sort_by_cached_key(|item| {
            (item.title().to_lowercase(), item.title().to_string())
        });

        let total = matching.len() as u64;
        Ok(Page::new(
            page.apply(matching.into_iter().cloned()),
            total,
            page,
        ))
    }

    async fn find_entry(
        &self,
        couple_id: Uuid,
        entry_id: Uuid,
    ) -> Result<Option<ListedItem<M>>, RepoError> {
        let tables = self.tables.read().await;
        let table = M::table(&tables);
        Ok(table
            .entries
            .get(&entry_id)
            .filter(|entry| entry.couple_id == couple_id)
            .and_then(|entry| table.listed(entry)))
    }

    async fn find_entry_for_item(
        &self,
        couple_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ListEntry<M::Status>>, RepoError> {
        let tables = self.tables.read().await;
        Ok(M::table(&tables)
            .entries
            .values()
            .find(|entry| entry.couple_id == couple_id && entry.item_id == item_id)
            .cloned())
    }

    async fn insert_entry(
        &self,
        entry: ListEntry<M::Status>,
    ) -> Result<ListEntry<M::Status>, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.couples.contains_key(&entry.couple_id) {
            return Err(RepoError::Constraint("list couple_id".to_string()));
        }
        let table = M::table_mut(&mut tables);
        if !table.items.contains_key(&entry.item_id) {
            return Err(RepoError::Constraint("list item_id".to_string()));
        }
        if table
            .entries
            .values()
            .any(|other| other.couple_id == entry.couple_id && other.item_id == entry.item_id)
        {
            return Err(RepoError::Constraint(
                "list (couple_id, item_id)".to_string(),
            ));
        }
        table.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_entry_status(
        &self,
        entry_id: Uuid,
        status: M::Status,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let entry = M::table_mut(&mut tables)
            .entries
            .get_mut(&entry_id)
            .ok_or(RepoError::NotFound)?;
        entry.status = status;
        Ok(())
    }

    async fn delete_entry(&self, entry_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        M::table_mut(&mut tables)
            .entries
            .remove(&entry_id)
            .ok_or(RepoError::NotFound)?;
        Ok(())
    }

    async fn list_entries(
        &self,
        couple_id: Uuid,
        status: Option<M::Status>,
        page: PageRequest,
    ) -> Result<Page<ListedItem<M>>, RepoError> {
        let tables = self.tables.read().await;
        let table = M::table(&tables);
        let mut matching: Vec<&ListEntry<M::Status>> = table
            .entries
            .values()
            .filter(|entry| {
                entry.couple_id == couple_id && status.is_none_or(|s| entry.status == s)
            })
            .collect();
        matching.sort_by(|a, b| b.added_at.cmp(&a.added_at));

        let total = matching.len() as u64;
        let items = page.apply(matching.into_iter().filter_map(|entry| table.listed(entry)));
        Ok(Page::new(items, total, page))
    }
}

#[cfg(test)]
mod tests {
    use twogether_core::domain::{Couple, MovieStatus};
    use twogether_core::ports::BaseRepository;

    use super::*;

    fn movie(tmdb_id: &str, title: &str, genre: &str) -> Movie {
        Movie {
            id: Uuid::new_v4(),
            tmdb_id: tmdb_id.to_string(),
            title: title.to_string(),
            director: None,
            genre: Some(genre.to_string()),
            runtime_minutes: None,
            poster_path: None,
            release_date: None,
        }
    }

    #[tokio::test]
    async fn duplicate_entries_are_rejected() {
        let store = InMemoryStore::new();
        let couple = BaseRepository::<Couple, Uuid>::insert(
            &store,
            Couple::new(Uuid::new_v4(), "CODE0001".into()),
        )
        .await
        .unwrap();
        let item = store
            .insert_item(movie("603", "The Matrix", "Action"))
            .await
            .unwrap();

        let entry = ListEntry::new(couple.id, item.id, MovieStatus::Pending);
        MediaRepository::<Movie>::insert_entry(&store, entry)
            .await
            .unwrap();

        let again = ListEntry::new(couple.id, item.id, MovieStatus::Watched);
        let result = MediaRepository::<Movie>::insert_entry(&store, again).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn catalog_is_sorted_and_filtered() {
        let store = InMemoryStore::new();
        for (id, title, genre) in [
            ("1", "Zodiac", "Crime"),
            ("2", "Amelie", "Comedy"),
            ("3", "Heat", "Crime"),
        ] {
            store.insert_item(movie(id, title, genre)).await.unwrap();
        }

        let query = CatalogQuery {
            search: None,
            filter: Some("crime".to_string()),
        };
        let page = MediaRepository::<Movie>::catalog(&store, &query, PageRequest::default())
            .await
            .unwrap();

        let titles: Vec<&str> = page.items.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Heat", "Zodiac"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn catalog_order_ignores_case() {
        let store = InMemoryStore::new();
        for (id, title) in [("1", "banana split"), ("2", "Cherry"), ("3", "Apple")] {
            store.insert_item(movie(id, title, "Drama")).await.unwrap();
        }

        let page = MediaRepository::<Movie>::catalog(
            &store,
            &CatalogQuery::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();

        let titles: Vec<&str> = page.items.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Apple", "banana split", "Cherry"]);
    }

    #[tokio::test]
    async fn songs_must_reference_a_stored_album() {
        let store = InMemoryStore::new();
        let song = |spotify_id: &str, album_id| Song {
            id: Uuid::new_v4(),
            spotify_id: spotify_id.to_string(),
            title: "Tití Me Preguntó".to_string(),
            artist: "Bad Bunny".to_string(),
            genre: None,
            duration_ms: None,
            image: None,
            album_id,
        };

        let dangling = store.insert_item(song("s1", Some(Uuid::new_v4()))).await;
        assert!(matches!(dangling, Err(RepoError::Constraint(_))));

        let album = store
            .insert_item(Album {
                id: Uuid::new_v4(),
                spotify_id: "a1".to_string(),
                title: "Un Verano Sin Ti".to_string(),
                artist: "Bad Bunny".to_string(),
                genre: None,
                track_count: Some(23),
                image: None,
                release_date: None,
            })
            .await
            .unwrap();
        let stored = store.insert_item(song("s1", Some(album.id))).await.unwrap();
        assert_eq!(
            MediaRepository::<Song>::find_item(&store, stored.id)
                .await
                .unwrap()
                .and_then(|s| s.album_id),
            Some(album.id)
        );
    }
}
