use sea_orm::Set;
use sea_orm::entity::prelude::*;

use twogether_core::domain::Movie;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub tmdb_id: String,
    pub title: String,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub poster_path: Option<String>,
    pub release_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_list::Entity")]
    MovieList,
}

impl Related<super::movie_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Movie {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            tmdb_id: model.tmdb_id,
            title: model.title,
            director: model.director,
            genre: model.genre,
            runtime_minutes: model.runtime_minutes,
            poster_path: model.poster_path,
            release_date: model.release_date,
        }
    }
}

impl From<Movie> for ActiveModel {
    fn from(movie: Movie) -> Self {
        Self {
            id: Set(movie.id),
            tmdb_id: Set(movie.tmdb_id),
            title: Set(movie.title),
            director: Set(movie.director),
            genre: Set(movie.genre),
            runtime_minutes: Set(movie.runtime_minutes),
            poster_path: Set(movie.poster_path),
            release_date: Set(movie.release_date),
        }
    }
}
