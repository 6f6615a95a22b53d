//! Data Transfer Objects - request/response types for the API.

mod auth;
mod dates;
mod external;
mod media;

pub use auth::*;
pub use dates::*;
pub use external::*;
pub use media::*;

use serde::{Deserialize, Deserializer};
use twogether_core::domain::PageRequest;

/// Largest page a client may ask for.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Paging parameters as sent by clients. The limit is clamped to
/// [`MAX_PAGE_LIMIT`], the offset to what the database can bind.
pub fn page_request(limit: Option<u64>, offset: Option<u64>) -> PageRequest {
    PageRequest::new(limit.map(|l| l.min(MAX_PAGE_LIMIT)), offset)
}

/// Tells an absent field (`None`) apart from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Blank query values count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
