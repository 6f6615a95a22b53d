use serde::{Deserialize, Serialize};

/// Largest window bound a SQL backend can bind (`BIGINT`).
pub const MAX_PAGE_BOUND: u64 = i64::MAX as u64;

/// Optional limit/offset paging. `None` means "no bound".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PageRequest {
    /// Bounds beyond [`MAX_PAGE_BOUND`] are clamped to it.
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.map(|l| l.min(MAX_PAGE_BOUND)),
            offset: offset.map(|o| o.min(MAX_PAGE_BOUND)),
        }
    }

    /// Apply this window to an already-filtered, already-ordered iterator.
    pub fn apply<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        let skipped = items.skip(self.offset.unwrap_or(0) as usize);
        match self.limit {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}

/// A page of results together with the unpaged match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            limit: request.limit,
            offset: request.offset,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
