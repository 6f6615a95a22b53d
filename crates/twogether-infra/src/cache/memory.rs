use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use twogether_core::ports::{Cache, CacheError};

struct Slot {
    value: String,
    expires_at: Option<Instant>,
}

impl Slot {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// HashMap-backed cache behind an async `RwLock`. Values vanish on restart.
#[derive(Default)]
pub struct InMemoryCache {
    slots: RwLock<HashMap<String, Slot>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired slot.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|_, slot| slot.is_live(now));
        before - slots.len()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        {
            let slots = self.slots.read().await;
            match slots.get(key) {
                Some(slot) if slot.is_live(now) => return Some(slot.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.slots.write().await.remove(key);
        None
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let slot = Slot {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.slots.write().await.insert(key.to_string(), slot);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_until_deleted() {
        let cache = InMemoryCache::new();
        cache.set("spotify:token", "abc", None).await.unwrap();
        assert_eq!(cache.get("spotify:token").await.as_deref(), Some("abc"));

        cache.delete("spotify:token").await.unwrap();
        assert_eq!(cache.get("spotify:token").await, None);
    }

    #[tokio::test]
    async fn expired_values_are_gone() {
        let cache = InMemoryCache::new();
        cache
            .set("short", "v", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        cache.set("long", "v", None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.purge_expired().await, 0);
        assert_eq!(cache.get("long").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn purge_counts_removed_slots() {
        let cache = InMemoryCache::new();
        cache
            .set("a", "1", Some(Duration::from_millis(5)))
            .await
            .unwrap();
        cache
            .set("b", "2", Some(Duration::from_millis(5)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.purge_expired().await, 2);
    }
}
