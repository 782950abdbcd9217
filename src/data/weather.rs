//! Cached current-weather client
//!
//! Serves a fresh cached payload when there is one; otherwise asks the API,
//! caches whatever comes back and returns it. Payloads are passed through
//! untouched.

use serde_json::Value;

use super::request::{RequestExecutor, WeatherError};
use super::{cache_key, location_query, CURRENT_WEATHER_ENDPOINT};
use crate::cache::{CacheStore, FileCache};
use crate::config::ClientConfig;

/// Client for current weather with a best-effort response cache
#[derive(Debug)]
pub struct WeatherClient<C = FileCache> {
    config: ClientConfig,
    executor: RequestExecutor,
    cache: C,
}

impl WeatherClient<FileCache> {
    /// Creates a client that caches responses under `config.cache_dir()`
    ///
    /// The cache directory is created here if it doesn't exist.
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let cache = FileCache::new(config.cache_dir(), config.cache_ttl())?;
        Self::with_cache(config, cache)
    }
}

impl<C: CacheStore> WeatherClient<C> {
    /// Creates a client backed by an arbitrary cache store
    pub fn with_cache(config: ClientConfig, cache: C) -> Result<Self, WeatherError> {
        let executor = RequestExecutor::new(&config)?;
        Ok(Self {
            config,
            executor,
            cache,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Fetches the current weather for `city`, optionally narrowed down by
    /// an ISO 3166 country code
    ///
    /// # Returns
    /// * `Some(Value)` - The API payload, from the cache if it is fresh
    /// * `None` - The request failed; the reason has already been logged
    pub async fn get_current_weather(&self, city: &str, country_code: Option<&str>) -> Option<Value> {
        let key = cache_key(city, country_code);

        if let Some(cached) = self.cache.lookup(&key).filter(|p| !is_empty_payload(p)) {
            tracing::debug!("Serving {} from cache", key);
            return Some(cached);
        }

        let query = location_query(city, country_code);
        let payload = self
            .executor
            .execute(CURRENT_WEATHER_ENDPOINT, &[("q", query.as_str())])
            .await?;

        if !is_empty_payload(&payload) {
            self.cache.store(&key, &payload);
        }

        Some(payload)
    }
}

/// Payloads that are falsy as JSON (`null`, `false`, `0`, `""`, `{}`, `[]`)
/// carry no weather and are never cached
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
    }
}
