//! Cache module for keeping API responses around between calls
//!
//! The cache is best-effort: a [`CacheStore`] never reports an error to its
//! caller. A failed or unparseable read looks exactly like a miss, and a failed
//! write is dropped. Entries older than the store's TTL are ignored and get
//! overwritten by the next successful fetch.

mod file;
mod memory;

pub use file::{CachedData, FileCache};
pub use memory::MemoryCache;

use serde_json::Value;

/// Key/value storage for raw weather payloads
///
/// Implementations must not panic and must not surface I/O or parse errors:
/// `lookup` returns `None` for anything other than a fresh, readable entry,
/// and `store` silently gives up if the payload cannot be persisted.
pub trait CacheStore {
    /// Returns the payload stored under `key` if it is still fresh
    fn lookup(&self, key: &str) -> Option<Value>;

    /// Stores `payload` under `key`, replacing any previous entry
    fn store(&self, key: &str, payload: &Value);
}

impl<C: CacheStore + ?Sized> CacheStore for &C {
    fn lookup(&self, key: &str) -> Option<Value> {
        (**self).lookup(key)
    }

    fn store(&self, key: &str, payload: &Value) {
        (**self).store(key, payload)
    }
}
