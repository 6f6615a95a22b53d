use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    CatalogQuery, Couple, DateFilter, DatePlan, ListEntry, ListedItem, MediaItem, Note, Page,
    PageRequest, User,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Fetch several users at once. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Couple repository.
#[async_trait]
pub trait CoupleRepository: BaseRepository<Couple, Uuid> {
    /// The couple record `user_id` belongs to, complete or not.
    async fn find_by_member(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError>;

    /// The complete couple `user_id` belongs to.
    async fn find_complete_by_member(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError>;

    /// The couple record owned (as first member) by `user_id`.
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<Couple>, RepoError>;

    async fn find_by_invite_code(&self, code: &str) -> Result<Option<Couple>, RepoError>;

    /// Persist a freshly linked couple and drop the joining user's previous
    /// record in one transaction.
    async fn link(&self, couple: Couple, discarded: Option<Uuid>) -> Result<Couple, RepoError>;

    /// Persist a split: update the record that is kept and insert the record
    /// created for the departing member, in one transaction.
    async fn split(&self, kept: Couple, created: Couple) -> Result<(), RepoError>;
}

/// Date repository. Every lookup is scoped to a couple.
#[async_trait]
pub trait DateRepository: BaseRepository<DatePlan, Uuid> {
    async fn find_for_couple(
        &self,
        couple_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DatePlan>, RepoError>;

    /// Matching dates ordered by `scheduled_at`, newest first.
    async fn list(
        &self,
        couple_id: Uuid,
        filter: &DateFilter,
        page: PageRequest,
    ) -> Result<Page<DatePlan>, RepoError>;
}

/// Note repository.
#[async_trait]
pub trait NoteRepository: BaseRepository<Note, Uuid> {
    /// Notes of one date, newest first.
    async fn list_for_date(&self, date_id: Uuid) -> Result<Vec<Note>, RepoError>;

    /// Notes of several dates, newest first.
    async fn list_for_dates(&self, date_ids: &[Uuid]) -> Result<Vec<Note>, RepoError>;
}

/// Catalog and wish-list storage for one media kind.
#[async_trait]
pub trait MediaRepository<M: MediaItem>: Send + Sync {
    async fn find_item(&self, item_id: Uuid) -> Result<Option<M>, RepoError>;

    async fn find_item_by_external_id(&self, external_id: &str) -> Result<Option<M>, RepoError>;

    async fn insert_item(&self, item: M) -> Result<M, RepoError>;

    /// Browse the local catalog, ordered by title.
    async fn catalog(&self, query: &CatalogQuery, page: PageRequest)
    -> Result<Page<M>, RepoError>;

    async fn find_entry(
        &self,
        couple_id: Uuid,
        entry_id: Uuid,
    ) -> Result<Option<ListedItem<M>>, RepoError>;

    async fn find_entry_for_item(
        &self,
        couple_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ListEntry<M::Status>>, RepoError>;

    /// Insert a list entry. A second entry for the same (couple, item) pair
    /// fails with [`RepoError::Constraint`].
    async fn insert_entry(
        &self,
        entry: ListEntry<M::Status>,
    ) -> Result<ListEntry<M::Status>, RepoError>;

    async fn update_entry_status(&self, entry_id: Uuid, status: M::Status)
    -> Result<(), RepoError>;

    async fn delete_entry(&self, entry_id: Uuid) -> Result<(), RepoError>;

    /// A couple's entries ordered by `added_at`, newest first.
    async fn list_entries(
        &self,
        couple_id: Uuid,
        status: Option<M::Status>,
        page: PageRequest,
    ) -> Result<Page<ListedItem<M>>, RepoError>;
}
