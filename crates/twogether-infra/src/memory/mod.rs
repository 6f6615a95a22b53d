//! In-memory repositories.
//!
//! One [`InMemoryStore`] implements every repository port over shared tables,
//! so cascading deletes behave like the relational schema. Used when no
//! database is configured and in tests.

mod media;
mod store;

pub use store::InMemoryStore;
