use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::Song;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub spotify_id: String,
    pub title: String,
    pub artist: String,
    pub genre: Option<String>,
    pub duration_ms: Option<i32>,
    pub image: Option<String>,
    pub album_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::album::Entity",
        from = "Column::AlbumId",
        to = "super::album::Column::Id",
        on_delete = "SetNull"
    )]
    Album,
    #[sea_orm(has_many = "super::song_list::Entity")]
    SongList,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl Related<super::song_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SongList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Song {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            spotify_id: model.spotify_id,
            title: model.title,
            artist: model.artist,
            genre: model.genre,
            duration_ms: model.duration_ms,
            image: model.image,
            album_id: model.album_id,
        }
    }
}

impl From<Song> for ActiveModel {
    fn from(song: Song) -> Self {
        Self {
            id: Set(song.id),
            spotify_id: Set(song.spotify_id),
            title: Set(song.title),
            artist: Set(song.artist),
            genre: Set(song.genre),
            duration_ms: Set(song.duration_ms),
            image: Set(song.image),
            album_id: Set(song.album_id),
        }
    }
}
