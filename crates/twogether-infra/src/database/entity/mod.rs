//! SeaORM entities. Each module converts to and from its domain type.

pub mod album;
pub mod album_list;
pub mod couple;
pub mod date_plan;
pub mod movie;
pub mod movie_list;
pub mod note;
pub mod song;
pub mod song_list;
pub mod user;
