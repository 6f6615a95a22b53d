//! A couple's song list.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::{ListEntry, SongStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "saved")]
    Saved,
    #[sea_orm(string_value = "favorite")]
    Favorite,
}

impl From<SongStatus> for Status {
    fn from(status: SongStatus) -> Self {
        match status {
            SongStatus::Saved => Status::Saved,
            SongStatus::Favorite => Status::Favorite,
        }
    }
}

impl From<Status> for SongStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Saved => SongStatus::Saved,
            Status::Favorite => SongStatus::Favorite,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "song_lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub couple_id: Uuid,
    pub song_id: Uuid,
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
        belongs_to = "super::song::Entity",
        from = "Column::SongId",
        to = "super::song::Column::Id",
        on_delete = "Cascade"
    )]
    Song,
}

impl Related<super::song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Song.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ListEntry<SongStatus> {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            couple_id: model.couple_id,
            item_id: model.song_id,
            status: model.status.into(),
            added_at: model.added_at.into(),
        }
    }
}

impl From<ListEntry<SongStatus>> for ActiveModel {
    fn from(entry: ListEntry<SongStatus>) -> Self {
        Self {
            id: Set(entry.id),
            couple_id: Set(entry.couple_id),
            song_id: Set(entry.item_id),
            status: Set(entry.status.into()),
            added_at: Set(entry.added_at.into()),
        }
    }
}
