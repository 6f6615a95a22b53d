//! Catalog and wish-list storage shared by movies, songs and albums.
//!
//! Each media kind maps onto a catalog table and a list table. [`MediaTables`]
//! names the columns the generic repository needs, so one implementation
//! serves all three kinds.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Order, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Value,
};
use uuid::Uuid;

use twogether_core::domain::{
    Album, CatalogQuery, ListEntry, ListedItem, MediaItem, Movie, Page, PageRequest, Song,
};
use twogether_core::error::RepoError;
use twogether_core::ports::MediaRepository;

use super::entity::{album, album_list, movie, movie_list, song, song_list};
use super::postgres_base::db_error;

type ItemColumn<M> = <<M as MediaTables>::Item as EntityTrait>::Column;
type ListColumn<M> = <<M as MediaTables>::List as EntityTrait>::Column;
type ItemModel<M> = <<M as MediaTables>::Item as EntityTrait>::Model;
type ItemActive<M> = <<M as MediaTables>::Item as EntityTrait>::ActiveModel;
type ListModel<M> = <<M as MediaTables>::List as EntityTrait>::Model;
type ListActive<M> = <<M as MediaTables>::List as EntityTrait>::ActiveModel;

/// Table layout of one media kind.
pub trait MediaTables: MediaItem {
    type Item: EntityTrait;
    type List: EntityTrait;

    const ITEM_ID: ItemColumn<Self>;
    const EXTERNAL_ID: ItemColumn<Self>;
    const TITLE: ItemColumn<Self>;
    /// Matched by `search` besides the title.
    const SEARCHED: ItemColumn<Self>;
    /// Matched by `filter`.
    const FILTERED: ItemColumn<Self>;

    const ENTRY_ID: ListColumn<Self>;
    const ENTRY_COUPLE: ListColumn<Self>;
    const ENTRY_ITEM: ListColumn<Self>;
    const ENTRY_STATUS: ListColumn<Self>;
    const ENTRY_ADDED: ListColumn<Self>;

    fn from_item(model: ItemModel<Self>) -> Self;
    fn into_item(self) -> ItemActive<Self>;
    fn from_entry(model: ListModel<Self>) -> ListEntry<Self::Status>;
    fn into_entry(entry: ListEntry<Self::Status>) -> ListActive<Self>;
    fn status_value(status: Self::Status) -> Value;
}

impl MediaTables for Movie {
    type Item = movie::Entity;
    type List = movie_list::Entity;

    const ITEM_ID: movie::Column = movie::Column::Id;
    const EXTERNAL_ID: movie::Column = movie::Column::TmdbId;
    const TITLE: movie::Column = movie::Column::Title;
    const SEARCHED: movie::Column = movie::Column::Director;
    const FILTERED: movie::Column = movie::Column::Genre;

    const ENTRY_ID: movie_list::Column = movie_list::Column::Id;
    const ENTRY_COUPLE: movie_list::Column = movie_list::Column::CoupleId;
    const ENTRY_ITEM: movie_list::Column = movie_list::Column::MovieId;
    const ENTRY_STATUS: movie_list::Column = movie_list::Column::Status;
    const ENTRY_ADDED: movie_list::Column = movie_list::Column::AddedAt;

    fn from_item(model: movie::Model) -> Self {
        model.into()
    }

    fn into_item(self) -> movie::ActiveModel {
        self.into()
    }

    fn from_entry(model: movie_list::Model) -> ListEntry<Self::Status> {
        model.into()
    }

    fn into_entry(entry: ListEntry<Self::Status>) -> movie_list::ActiveModel {
        entry.into()
    }

    fn status_value(status: Self::Status) -> Value {
        movie_list::Status::from(status).into()
    }
}

impl MediaTables for Song {
    type Item = song::Entity;
    type List = song_list::Entity;

    const ITEM_ID: song::Column = song::Column::Id;
    const EXTERNAL_ID: song::Column = song::Column::SpotifyId;
    const TITLE: song::Column = song::Column::Title;
    const SEARCHED: song::Column = song::Column::Artist;
    const FILTERED: song::Column = song::Column::Artist;

    const ENTRY_ID: song_list::Column = song_list::Column::Id;
    const ENTRY_COUPLE: song_list::Column = song_list::Column::CoupleId;
    const ENTRY_ITEM: song_list::Column = song_list::Column::SongId;
    const ENTRY_STATUS: song_list::Column = song_list::Column::Status;
    const ENTRY_ADDED: song_list::Column = song_list::Column::AddedAt;

    fn from_item(model: song::Model) -> Self {
        model.into()
    }

    fn into_item(self) -> song::ActiveModel {
        self.into()
    }

    fn from_entry(model: song_list::Model) -> ListEntry<Self::Status> {
        model.into()
    }

    fn into_entry(entry: ListEntry<Self::Status>) -> song_list::ActiveModel {
        entry.into()
    }

    fn status_value(status: Self::Status) -> Value {
        song_list::Status::from(status).into()
    }
}

impl MediaTables for Album {
    type Item = album::Entity;
    type List = album_list::Entity;

    const ITEM_ID: album::Column = album::Column::Id;
    const EXTERNAL_ID: album::Column = album::Column::SpotifyId;
    const TITLE: album::Column = album::Column::Title;
    const SEARCHED: album::Column = album::Column::Artist;
    const FILTERED: album::Column = album::Column::Artist;

    const ENTRY_ID: album_list::Column = album_list::Column::Id;
    const ENTRY_COUPLE: album_list::Column = album_list::Column::CoupleId;
    const ENTRY_ITEM: album_list::Column = album_list::Column::AlbumId;
    const ENTRY_STATUS: album_list::Column = album_list::Column::Status;
    const ENTRY_ADDED: album_list::Column = album_list::Column::AddedAt;

    fn from_item(model: album::Model) -> Self {
        model.into()
    }

    fn into_item(self) -> album::ActiveModel {
        self.into()
    }

    fn from_entry(model: album_list::Model) -> ListEntry<Self::Status> {
        model.into()
    }

    fn into_entry(entry: ListEntry<Self::Status>) -> album_list::ActiveModel {
        entry.into()
    }

    fn status_value(status: Self::Status) -> Value {
        album_list::Status::from(status).into()
    }
}

/// `%needle%` in lower case, with LIKE wildcards in `needle` escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn lower<C>(column: C) -> SimpleExpr
where
    C: ColumnTrait + 'static,
{
    Func::lower(Expr::col(column)).into()
}

/// Case-insensitive substring match on a text column.
fn ilike<C>(column: C, needle: &str) -> SimpleExpr
where
    C: ColumnTrait + 'static,
{
    Expr::expr(lower(column)).like(LikeExpr::new(contains_pattern(needle)).escape('\\'))
}

pub struct PostgresMediaRepository<M> {
    db: DbConn,
    _kind: PhantomData<fn() -> M>,
}

impl<M> PostgresMediaRepository<M> {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }
}

impl<M: MediaTables> PostgresMediaRepository<M>
where
    ItemModel<M>: Send + Sync,
    ListModel<M>: Send + Sync,
{
    /// Attach catalog rows to list entries, preserving entry order.
    async fn join_items(
        &self,
        entries: Vec<ListEntry<M::Status>>,
    ) -> Result<Vec<ListedItem<M>>, RepoError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = entries.iter().map(|entry| entry.item_id).collect();
        let items: HashMap<Uuid, M> = M::Item::find()
            .filter(M::ITEM_ID.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|model| {
                let item = M::from_item(model);
                (item.id(), item)
            })
            .collect();

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let item = items.get(&entry.item_id)?.clone();
                Some(ListedItem { entry, item })
            })
            .collect())
    }
}

#[async_trait]
impl<M> MediaRepository<M> for PostgresMediaRepository<M>
where
    M: MediaTables,
    ItemModel<M>: IntoActiveModel<ItemActive<M>> + Send + Sync,
    ItemActive<M>: ActiveModelTrait<Entity = M::Item> + ActiveModelBehavior + Send + Sync,
    ListModel<M>: IntoActiveModel<ListActive<M>> + Send + Sync,
    ListActive<M>: ActiveModelTrait<Entity = M::List> + ActiveModelBehavior + Send + Sync,
{
    async fn find_item(&self, item_id: Uuid) -> Result<Option<M>, RepoError> {
        let model = M::Item::find()
            .filter(M::ITEM_ID.eq(item_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(M::from_item))
    }

    async fn find_item_by_external_id(&self, external_id: &str) -> Result<Option<M>, RepoError> {
        let model = M::Item::find()
            .filter(M::EXTERNAL_ID.eq(external_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(M::from_item))
    }

    async fn insert_item(&self, item: M) -> Result<M, RepoError> {
        let model = item.into_item().insert(&self.db).await.map_err(db_error)?;
        Ok(M::from_item(model))
    }

    async fn catalog(
        &self,
        query: &CatalogQuery,
        page: PageRequest,
    ) -> Result<Page<M>, RepoError> {
        let mut select = M::Item::find();
        if let Some(search) = query.search.as_deref() {
            select = select.filter(
                Condition::any()
                    .add(ilike(M::TITLE, search))
                    .add(ilike(M::SEARCHED, search)),
            );
        }
        if let Some(filter) = query.filter.as_deref() {
            select = select.filter(ilike(M::FILTERED, filter));
        }

        let total = select.clone().count(&self.db).await.map_err(db_error)?;
        let models = select
            .order_by(lower(M::TITLE), Order::Asc)
            .order_by_asc(M::TITLE)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            models.into_iter().map(M::from_item).collect(),
            total,
            page,
        ))
    }

    async fn find_entry(
        &self,
        couple_id: Uuid,
        entry_id: Uuid,
    ) -> Result<Option<ListedItem<M>>, RepoError> {
        let model = M::List::find()
            .filter(M::ENTRY_ID.eq(entry_id))
            .filter(M::ENTRY_COUPLE.eq(couple_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        match model {
            Some(model) => Ok(self
                .join_items(vec![M::from_entry(model)])
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    async fn find_entry_for_item(
        &self,
        couple_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ListEntry<M::Status>>, RepoError> {
        let model = M::List::find()
            .filter(M::ENTRY_COUPLE.eq(couple_id))
            .filter(M::ENTRY_ITEM.eq(item_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(M::from_entry))
    }

    async fn insert_entry(
        &self,
        entry: ListEntry<M::Status>,
    ) -> Result<ListEntry<M::Status>, RepoError> {
        let model = M::into_entry(entry)
            .insert(&self.db)
            .await
            .map_err(db_error)?;
        Ok(M::from_entry(model))
    }

    async fn update_entry_status(
        &self,
        entry_id: Uuid,
        status: M::Status,
    ) -> Result<(), RepoError> {
        let result = M::List::update_many()
            .col_expr(M::ENTRY_STATUS, Expr::value(M::status_value(status)))
            .filter(M::ENTRY_ID.eq(entry_id))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_entry(&self, entry_id: Uuid) -> Result<(), RepoError> {
        let result = M::List::delete_many()
            .filter(M::ENTRY_ID.eq(entry_id))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn list_entries(
        &self,
        couple_id: Uuid,
        status: Option<M::Status>,
        page: PageRequest,
    ) -> Result<Page<ListedItem<M>>, RepoError> {
        let mut select = M::List::find().filter(M::ENTRY_COUPLE.eq(couple_id));
        if let Some(status) = status {
            select = select.filter(M::ENTRY_STATUS.eq(M::status_value(status)));
        }

        let total = select.clone().count(&self.db).await.map_err(db_error)?;
        let models = select
            .order_by_desc(M::ENTRY_ADDED)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let entries = models.into_iter().map(M::from_entry).collect();
        Ok(Page::new(self.join_items(entries).await?, total, page))
    }
}
