//! Domain entities - the core business objects.

mod couple;
mod date_plan;
mod media;
mod note;
mod page;
mod user;

pub use couple::{Couple, INVITE_CODE_LEN, generate_invite_code};
pub use date_plan::{DateFilter, DateKind, DatePlan};
pub use media::{
    Album, AlbumStatus, CatalogQuery, ListEntry, ListStatus, ListedItem, MediaItem, Movie,
    MovieStatus, Song, SongStatus,
};
pub use note::Note;
pub use page::{Page, PageRequest};
pub use user::User;
