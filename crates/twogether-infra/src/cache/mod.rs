//! Process-local cache.

mod memory;

pub use memory::InMemoryCache;
