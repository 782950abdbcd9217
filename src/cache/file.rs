//! Filesystem-backed cache
//!
//! Stores each entry as a pretty-printed JSON file named after its key. The
//! file's modification time is the entry's timestamp, so nothing but the
//! payload itself is written to disk.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::CacheStore;

/// Result of reading from the cache, including metadata about freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the entry was last written (the file's modification time)
    pub cached_at: DateTime<Utc>,
    /// Whether the entry is at least as old as the cache TTL
    pub is_expired: bool,
}

/// Reads and writes cached payloads as JSON files in a single directory
#[derive(Debug, Clone)]
pub struct FileCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Maximum age of a fresh entry
    ttl: Duration,
}

impl FileCache {
    /// Creates a cache rooted at `cache_dir`, creating the directory (and its
    /// parents) if it does not exist yet
    pub fn new(cache_dir: impl Into<PathBuf>, ttl: Duration) -> io::Result<Self> {
        let cache = Self {
            cache_dir: cache_dir.into(),
            ttl,
        };
        cache.ensure_dir()?;
        Ok(cache)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", file_stem(key)))
    }

    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes `data` under `key`, overwriting any previous entry
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, serialization or the write fails
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> io::Result<()> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(self.path_for(key), json)
    }

    /// Reads the entry stored under `key`, fresh or not
    ///
    /// Returns `None` if the file doesn't exist, its timestamp can't be read,
    /// or its content doesn't parse as `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let path = self.path_for(key);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        let content = fs::read_to_string(&path).ok()?;

        let data: T = match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Ignoring unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        // A timestamp in the future (clock skew) counts as brand new.
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);

        Some(CachedData {
            data,
            cached_at: DateTime::<Utc>::from(modified),
            is_expired: age >= self.ttl,
        })
    }
}

impl CacheStore for FileCache {
    fn lookup(&self, key: &str) -> Option<Value> {
        let cached = self.read::<Value>(key)?;
        tracing::debug!(
            "Cache entry {} written at {} (expired: {})",
            key,
            cached.cached_at.to_rfc3339(),
            cached.is_expired
        );

        if cached.is_expired {
            None
        } else {
            Some(cached.data)
        }
    }

    fn store(&self, key: &str, payload: &Value) {
        if let Err(e) = self.write(key, payload) {
            tracing::debug!("Failed to write cache entry {}: {}", key, e);
        }
    }
}

/// Maps a cache key to a file name, replacing characters that are path
/// separators or otherwise invalid in file names
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
