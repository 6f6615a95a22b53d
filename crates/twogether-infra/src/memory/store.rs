use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use twogether_core::domain::{
    Album, Couple, DateFilter, DatePlan, Movie, Note, Page, PageRequest, Song, User,
};
use twogether_core::error::RepoError;
use twogether_core::ports::{
    BaseRepository, CoupleRepository, DateRepository, NoteRepository, UserRepository,
};

use super::media::MediaTable;

#[derive(Default)]
pub(super) struct Tables {
    pub(super) users: HashMap<Uuid, User>,
    pub(super) couples: HashMap<Uuid, Couple>,
    pub(super) dates: HashMap<Uuid, DatePlan>,
    pub(super) notes: HashMap<Uuid, Note>,
    pub(super) movies: MediaTable<Movie>,
    pub(super) songs: MediaTable<Song>,
    pub(super) albums: MediaTable<Album>,
}

impl Tables {
    fn drop_date(&mut self, date_id: Uuid) {
        self.dates.remove(&date_id);
        self.notes.retain(|_, note| note.date_id != date_id);
    }

    fn drop_couple(&mut self, couple_id: Uuid) {
        self.couples.remove(&couple_id);
        let dates: Vec<Uuid> = self
            .dates
            .values()
            .filter(|date| date.couple_id == couple_id)
            .map(|date| date.id)
            .collect();
        for date_id in dates {
            self.drop_date(date_id);
        }
        self.movies.drop_couple(couple_id);
        self.songs.drop_couple(couple_id);
        self.albums.drop_couple(couple_id);
    }

    /// Fails when `couple` would break a unique key of another row. Rows in
    /// `ignored` are about to be replaced or removed and do not count.
    fn ensure_unique_couple(&self, couple: &Couple, ignored: &[Uuid]) -> Result<(), RepoError> {
        let clash = self
            .couples
            .values()
            .filter(|other| !ignored.contains(&other.id))
            .any(|other| couples_clash(couple, other));
        if clash {
            return Err(RepoError::Constraint("couples unique key".to_string()));
        }
        Ok(())
    }
}

fn couples_clash(a: &Couple, b: &Couple) -> bool {
    a.id != b.id
        && (a.invite_code == b.invite_code
            || a.user1_id == b.user1_id
            || (a.user2_id.is_some() && a.user2_id == b.user2_id))
}

/// Shared in-memory tables. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub(super) tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|other| other.email == user.email) {
            return Err(RepoError::Constraint("users.email".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.users.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;
        let owned: Vec<Uuid> = tables
            .couples
            .values()
            .filter(|couple| couple.user1_id == id)
            .map(|couple| couple.id)
            .collect();
        for couple_id in owned {
            tables.drop_couple(couple_id);
        }
        for couple in tables.couples.values_mut() {
            if couple.user2_id == Some(id) {
                couple.user2_id = None;
            }
        }
        tables.notes.retain(|_, note| note.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Couple, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Couple>, RepoError> {
        Ok(self.tables.read().await.couples.get(&id).cloned())
    }

    async fn insert(&self, couple: Couple) -> Result<Couple, RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_unique_couple(&couple, &[])?;
        tables.couples.insert(couple.id, couple.clone());
        Ok(couple)
    }

    async fn update(&self, couple: Couple) -> Result<Couple, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.couples.contains_key(&couple.id) {
            return Err(RepoError::NotFound);
        }
        tables.ensure_unique_couple(&couple, &[])?;
        tables.couples.insert(couple.id, couple.clone());
        Ok(couple)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.couples.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.drop_couple(id);
        Ok(())
    }
}

#[async_trait]
impl CoupleRepository for InMemoryStore {
    async fn find_by_member(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .couples
            .values()
            .find(|c| c.has_member(user_id))
            .cloned())
    }

    async fn find_complete_by_member(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .couples
            .values()
            .find(|c| c.is_complete() && c.has_member(user_id))
            .cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .couples
            .values()
            .find(|c| c.is_owner(user_id))
            .cloned())
    }

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Couple>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .couples
            .values()
            .find(|c| c.invite_code == code)
            .cloned())
    }

    async fn link(&self, couple: Couple, discarded: Option<Uuid>) -> Result<Couple, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.couples.contains_key(&couple.id) {
            return Err(RepoError::NotFound);
        }
        let ignored: Vec<Uuid> = discarded.into_iter().collect();
        tables.ensure_unique_couple(&couple, &ignored)?;

        if let Some(id) = discarded {
            tables.drop_couple(id);
        }
        tables.couples.insert(couple.id, couple.clone());
        Ok(couple)
    }

    async fn split(&self, kept: Couple, created: Couple) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.couples.contains_key(&kept.id) {
            return Err(RepoError::NotFound);
        }
        tables.ensure_unique_couple(&kept, &[created.id])?;
        tables.ensure_unique_couple(&created, &[kept.id])?;
        if couples_clash(&kept, &created) {
            return Err(RepoError::Constraint("couples unique key".to_string()));
        }

        tables.couples.insert(kept.id, kept);
        tables.couples.insert(created.id, created);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<DatePlan, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<DatePlan>, RepoError> {
        Ok(self.tables.read().await.dates.get(&id).cloned())
    }

    async fn insert(&self, date: DatePlan) -> Result<DatePlan, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.couples.contains_key(&date.couple_id) {
            return Err(RepoError::Constraint("date_plans.couple_id".to_string()));
        }
        tables.dates.insert(date.id, date.clone());
        Ok(date)
    }

    async fn update(&self, date: DatePlan) -> Result<DatePlan, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.dates.get_mut(&date.id).ok_or(RepoError::NotFound)?;
        *slot = date.clone();
        Ok(date)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.dates.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.drop_date(id);
        Ok(())
    }
}

#[async_trait]
impl DateRepository for InMemoryStore {
    async fn find_for_couple(
        &self,
        couple_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DatePlan>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .dates
            .get(&id)
            .filter(|date| date.couple_id == couple_id)
            .cloned())
    }

    async fn list(
        &self,
        couple_id: Uuid,
        filter: &DateFilter,
        page: PageRequest,
    ) -> Result<Page<DatePlan>, RepoError> {
        let tables = self.tables.read().await;
        let mut matching: Vec<&DatePlan> = tables
            .dates
            .values()
            .filter(|date| date.couple_id == couple_id && filter.matches(date))
            .collect();
        matching.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));

        let total = matching.len() as u64;
        let items = page.apply(matching.into_iter().cloned());
        Ok(Page::new(items, total, page))
    }
}

#[async_trait]
impl BaseRepository<Note, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, RepoError> {
        Ok(self.tables.read().await.notes.get(&id).cloned())
    }

    async fn insert(&self, note: Note) -> Result<Note, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.dates.contains_key(&note.date_id) {
            return Err(RepoError::Constraint("notes.date_id".to_string()));
        }
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, note: Note) -> Result<Note, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.notes.get_mut(&note.id).ok_or(RepoError::NotFound)?;
        *slot = note.clone();
        Ok(note)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.notes.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn list_for_date(&self, date_id: Uuid) -> Result<Vec<Note>, RepoError> {
        self.list_for_dates(&[date_id]).await
    }

    async fn list_for_dates(&self, date_ids: &[Uuid]) -> Result<Vec<Note>, RepoError> {
        let tables = self.tables.read().await;
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|note| date_ids.contains(&note.date_id))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;

    async fn save_couple(store: &InMemoryStore, owner: Uuid, code: &str) -> Couple {
        BaseRepository::<Couple, Uuid>::insert(store, Couple::new(owner, code.to_string()))
            .await
            .unwrap()
    }

    async fn save_date(store: &InMemoryStore, date: DatePlan) -> DatePlan {
        BaseRepository::<DatePlan, Uuid>::insert(store, date)
            .await
            .unwrap()
    }

    async fn couple_with_date(store: &InMemoryStore) -> (Couple, DatePlan) {
        let couple = save_couple(store, Uuid::new_v4(), "AAAA1111").await;
        let date = DatePlan::new(
            couple.id,
            "Picnic".into(),
            None,
            Utc::now(),
            Default::default(),
        );
        let date = save_date(store, date).await;
        (couple, date)
    }

    #[tokio::test]
    async fn deleting_a_date_drops_its_notes() {
        let store = InMemoryStore::new();
        let (couple, date) = couple_with_date(&store).await;
        let note = Note::new(date.id, couple.user1_id, "lindo".into());
        BaseRepository::<Note, Uuid>::insert(&store, note)
            .await
            .unwrap();

        BaseRepository::<DatePlan, Uuid>::delete(&store, date.id)
            .await
            .unwrap();

        assert!(store.list_for_date(date.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invite_codes_are_unique() {
        let store = InMemoryStore::new();
        save_couple(&store, Uuid::new_v4(), "SAME0000").await;

        let clash = BaseRepository::<Couple, Uuid>::insert(
            &store,
            Couple::new(Uuid::new_v4(), "SAME0000".into()),
        )
        .await;
        assert!(matches!(clash, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn linking_discards_the_joiners_record() {
        let store = InMemoryStore::new();
        let (mut target, _) = couple_with_date(&store).await;
        let joiner = Uuid::new_v4();
        let own = save_couple(&store, joiner, "BBBB2222").await;

        target.link(joiner);
        store.link(target.clone(), Some(own.id)).await.unwrap();

        let found = store
            .find_complete_by_member(joiner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, target.id);
        assert!(store.find_by_owner(joiner).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_split_leaves_the_couple_untouched() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let partner = Uuid::new_v4();
        let mut shared = save_couple(&store, owner, "AAAA1111").await;
        save_couple(&store, Uuid::new_v4(), "TAKEN000").await;
        shared.link(partner);
        store.link(shared.clone(), None).await.unwrap();

        let mut kept = shared.clone();
        kept.detach_partner("FRESH000".into());
        let created = Couple::new(partner, "TAKEN000".into());
        let result = store.split(kept, created).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));

        let stored = BaseRepository::<Couple, Uuid>::find_by_id(&store, shared.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user2_id, Some(partner));
        assert_eq!(stored.invite_code, "AAAA1111");
        assert!(store.find_by_owner(partner).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_link_keeps_the_joiners_record() {
        let store = InMemoryStore::new();
        let (mut target, _) = couple_with_date(&store).await;
        let joiner = Uuid::new_v4();
        let own = save_couple(&store, joiner, "BBBB2222").await;
        // The joiner already sits in another couple as second member.
        let mut elsewhere = save_couple(&store, Uuid::new_v4(), "CCCC3333").await;
        elsewhere.link(joiner);
        store.link(elsewhere, None).await.unwrap();

        target.link(joiner);
        let result = store.link(target, Some(own.id)).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(
            store.find_by_owner(joiner).await.unwrap().map(|c| c.id),
            Some(own.id)
        );
    }

    #[tokio::test]
    async fn date_listing_is_newest_first() {
        let store = InMemoryStore::new();
        let (couple, first) = couple_with_date(&store).await;
        let later = DatePlan::new(
            couple.id,
            "Viaje".into(),
            None,
            first.scheduled_at + TimeDelta::days(3),
            Default::default(),
        );
        let later = save_date(&store, later).await;

        let page = store
            .list(
                couple.id,
                &DateFilter::default(),
                PageRequest::new(Some(1), None),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, later.id);
    }
}
