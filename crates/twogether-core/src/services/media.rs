use std::sync::Arc;

use uuid::Uuid;

use super::resolve_couple;
use crate::domain::{Album, CatalogQuery, ListEntry, ListedItem, MediaItem, Page, PageRequest};
use crate::error::{DomainError, RepoError};
use crate::ports::{CoupleRepository, MediaRepository};

/// Catalog browsing and wish-list management for one media kind.
pub struct MediaService<M: MediaItem> {
    couples: Arc<dyn CoupleRepository>,
    media: Arc<dyn MediaRepository<M>>,
    /// Resolves album references carried by items (songs).
    albums: Option<Arc<dyn MediaRepository<Album>>>,
}

impl<M: MediaItem> Clone for MediaService<M> {
    fn clone(&self) -> Self {
        Self {
            couples: Arc::clone(&self.couples),
            media: Arc::clone(&self.media),
            albums: self.albums.clone(),
        }
    }
}

impl<M: MediaItem> MediaService<M> {
    pub fn new(couples: Arc<dyn CoupleRepository>, media: Arc<dyn MediaRepository<M>>) -> Self {
        Self {
            couples,
            media,
            albums: None,
        }
    }

    /// Check album references against `albums` before caching an item.
    pub fn with_albums(mut self, albums: Arc<dyn MediaRepository<Album>>) -> Self {
        self.albums = Some(albums);
        self
    }

    /// Browse the locally cached catalog. Needs no couple.
    pub async fn catalog(
        &self,
        query: &CatalogQuery,
        page: PageRequest,
    ) -> Result<Page<M>, DomainError> {
        Ok(self.media.catalog(query, page).await?)
    }

    /// Put `item` on the couple's list, caching it in the catalog on first use.
    pub async fn add(
        &self,
        user_id: Uuid,
        item: M,
        status: Option<M::Status>,
    ) -> Result<ListedItem<M>, DomainError> {
        if item.external_id().trim().is_empty() || item.title().trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "{} id and title are required",
                M::KIND
            )));
        }
        let couple = resolve_couple(self.couples.as_ref(), user_id).await?;
        if let Some(album_id) = item.album_id() {
            self.ensure_album(album_id).await?;
        }

        let item = match self
            .media
            .find_item_by_external_id(item.external_id())
            .await?
        {
            Some(existing) => existing,
            None => self.media.insert_item(item).await?,
        };

        if self
            .media
            .find_entry_for_item(couple.id, item.id())
            .await?
            .is_some()
        {
            return Err(self.already_listed());
        }

        let entry = ListEntry::new(couple.id, item.id(), status.unwrap_or_default());
        let entry = match self.media.insert_entry(entry).await {
            Ok(entry) => entry,
            Err(RepoError::Constraint(_)) => return Err(self.already_listed()),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            couple_id = %couple.id,
            kind = M::KIND,
            external_id = item.external_id(),
            "Added to list"
        );
        Ok(ListedItem { entry, item })
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        status: Option<M::Status>,
        page: PageRequest,
    ) -> Result<Page<ListedItem<M>>, DomainError> {
        let couple = resolve_couple(self.couples.as_ref(), user_id).await?;
        Ok(self.media.list_entries(couple.id, status, page).await?)
    }

    pub async fn set_status(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        status: M::Status,
    ) -> Result<ListedItem<M>, DomainError> {
        let mut listed = self.entry(user_id, entry_id).await?;
        self.media.update_entry_status(entry_id, status).await?;
        listed.entry.status = status;
        Ok(listed)
    }

    /// Take an entry off the list. The catalog row stays.
    pub async fn remove(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), DomainError> {
        let listed = self.entry(user_id, entry_id).await?;
        self.media.delete_entry(listed.entry.id).await?;
        Ok(())
    }

    async fn ensure_album(&self, album_id: Uuid) -> Result<(), DomainError> {
        let known = match &self.albums {
            Some(albums) => albums.find_item(album_id).await?.is_some(),
            None => false,
        };
        if !known {
            return Err(DomainError::not_found("album", album_id));
        }
        Ok(())
    }

    async fn entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<ListedItem<M>, DomainError> {
        let couple = resolve_couple(self.couples.as_ref(), user_id).await?;
        self.media
            .find_entry(couple.id, entry_id)
            .await?
            .ok_or_else(|| DomainError::not_found(M::KIND, entry_id))
    }

    fn already_listed(&self) -> DomainError {
        DomainError::Duplicate(format!("This {} is already on your list", M::KIND))
    }
}
