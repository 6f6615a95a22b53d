//! A couple's movie wish-list.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::{ListEntry, MovieStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "watched")]
    Watched,
}

impl From<MovieStatus> for Status {
    fn from(status: MovieStatus) -> Self {
        match status {
            MovieStatus::Pending => Status::Pending,
            MovieStatus::Watched => Status::Watched,
        }
    }
}

impl From<Status> for MovieStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => MovieStatus::Pending,
            Status::Watched => MovieStatus::Watched,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie_lists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub couple_id: Uuid,
    pub movie_id: Uuid,
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
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ListEntry<MovieStatus> {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            couple_id: model.couple_id,
            item_id: model.movie_id,
            status: model.status.into(),
            added_at: model.added_at.into(),
        }
    }
}

impl From<ListEntry<MovieStatus>> for ActiveModel {
    fn from(entry: ListEntry<MovieStatus>) -> Self {
        Self {
            id: Set(entry.id),
            couple_id: Set(entry.couple_id),
            movie_id: Set(entry.item_id),
            status: Set(entry.status.into()),
            added_at: Set(entry.added_at.into()),
        }
    }
}
