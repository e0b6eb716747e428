use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: Instant,
}

/// Query results keyed by request path, fresh for `stale_time`.
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    stale_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: Arc::default(),
            stale_time,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value when present and not yet stale.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() >= self.stale_time {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Skipping cache insert: {}", e);
                return;
            }
        };
        self.lock().insert(
            key.into(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drops every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.lock().retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entries_go_stale() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("/api/teams", &vec!["a", "b"]);

        let hit: Option<Vec<String>> = cache.get("/api/teams");
        assert_eq!(hit, Some(vec!["a".to_string(), "b".to_string()]));

        tokio::time::advance(Duration::from_secs(61)).await;
        let miss: Option<Vec<String>> = cache.get("/api/teams");
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache = QueryCache::default();
        cache.insert("/api/discussions?page=1", &1);
        cache.insert("/api/discussions/abc", &2);
        cache.insert("/api/comments?discussionId=abc", &3);

        cache.invalidate_prefix("/api/discussions");

        assert!(!cache.contains("/api/discussions?page=1"));
        assert!(!cache.contains("/api/discussions/abc"));
        assert!(cache.contains("/api/comments?discussionId=abc"));
    }

    #[tokio::test]
    async fn test_type_mismatch_is_a_miss() {
        let cache = QueryCache::default();
        cache.insert("/api/auth/me", &"not a number");
        let value: Option<u32> = cache.get("/api/auth/me");
        assert!(value.is_none());
    }
}
