use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::Album;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "albums")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub spotify_id: String,
    pub title: String,
    pub artist: String,
    pub genre: Option<String>,
    pub track_count: Option<i32>,
    pub image: Option<String>,
    pub release_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::album_list::Entity")]
    AlbumList,
    #[sea_orm(has_many = "super::song::Entity")]
    Song,
}

impl Related<super::album_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AlbumList.def()
    }
}

impl Related<super::song::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Song.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Album {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            spotify_id: model.spotify_id,
            title: model.title,
            artist: model.artist,
            genre: model.genre,
            track_count: model.track_count,
            image: model.image,
            release_date: model.release_date,
        }
    }
}

impl From<Album> for ActiveModel {
    fn from(album: Album) -> Self {
        Self {
            id: Set(album.id),
            spotify_id: Set(album.spotify_id),
            title: Set(album.title),
            artist: Set(album.artist),
            genre: Set(album.genre),
            track_count: Set(album.track_count),
            image: Set(album.image),
            release_date: Set(album.release_date),
        }
    }
}
