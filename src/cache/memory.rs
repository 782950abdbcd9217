//! In-process cache with the same freshness rules as [`FileCache`](super::FileCache)

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::CacheStore;

/// Keeps payloads in a map for the lifetime of the process
#[derive(Debug)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Instant, Value)>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of entries held, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn lookup(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().ok()?;
        let (stored_at, payload) = entries.get(key)?;

        if stored_at.elapsed() < self.ttl {
            Some(payload.clone())
        } else {
            None
        }
    }

    fn store(&self, key: &str, payload: &Value) {
        // A poisoned lock means a panic elsewhere; skip the write.
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (Instant::now(), payload.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_missing_key() {
        let cache = MemoryCache::new(Duration::from_secs(600));
        assert!(cache.lookup("current_Lima").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_then_lookup() {
        let cache = MemoryCache::new(Duration::from_secs(600));

        cache.store("current_Lima", &json!({"temp": 19}));

        assert_eq!(cache.lookup("current_Lima"), Some(json!({"temp": 19})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_never_serves_entries() {
        let cache = MemoryCache::new(Duration::ZERO);

        cache.store("current_Lima", &json!({"temp": 19}));

        assert!(cache.lookup("current_Lima").is_none());
        assert_eq!(cache.len(), 1, "Stale entries are kept until overwritten");
    }
}
