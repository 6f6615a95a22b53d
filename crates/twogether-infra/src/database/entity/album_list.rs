//! A couple's album wish-list.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::{ListEntry, AlbumStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "listened")]
    Listened,
}

impl From<AlbumStatus> for Status {
    fn from(status: AlbumStatus) -> Self {
        match status {
            AlbumStatus::Pending => Status::Pending,
            AlbumStatus::Listened => Status::Listened,
        }
    }
}

impl From<Status> for AlbumStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => AlbumStatus::Pending,
            Status::Listened => AlbumStatus::Listened,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "album_lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub couple_id: Uuid,
    pub album_id: Uuid,
    pub status: Status,
    pub added_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::couple::Entity",
        from = "Column::CoupleId",
        to = "super::couple::Column::Id",
        on_delete = "Cascade"
    )]
    Couple,
    #[sea_orm(
        belongs_to = "super::album::Entity",
        from = "Column::AlbumId",
        to = "super::album::Column::Id",
        on_delete = "Cascade"
    )]
    Album,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ListEntry<AlbumStatus> {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            couple_id: model.couple_id,
            item_id: model.album_id,
            status: model.status.into(),
            added_at: model.added_at.into(),
        }
    }
}

impl From<ListEntry<AlbumStatus>> for ActiveModel {
    fn from(entry: ListEntry<AlbumStatus>) -> Self {
        Self {
            id: Set(entry.id),
            couple_id: Set(entry.couple_id),
            album_id: Set(entry.item_id),
            status: Set(entry.status.into()),
            added_at: Set(entry.added_at.into()),
        }
    }
}
