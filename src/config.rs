//! Client configuration
//!
//! Everything the weather client needs to know up front: the API key, where
//! the upstream API lives, where cached responses go and how long they stay
//! fresh. A `ClientConfig` is built once and then owned by the client.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Base URL for the OpenWeatherMap 2.5 API
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// How long a cached response is considered fresh (10 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Upper bound on a single HTTP request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Unit system requested from the upstream API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius, metres per second
    #[default]
    Metric,
    /// Fahrenheit, miles per hour
    Imperial,
    /// Kelvin, metres per second
    Standard,
}

impl Units {
    /// Value sent as the `units` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

/// Configuration for a [`WeatherClient`](crate::data::WeatherClient)
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    cache_dir: PathBuf,
    cache_ttl: Duration,
    timeout: Duration,
    units: Units,
}

impl ClientConfig {
    /// Creates a configuration with default base URL, TTL, timeout and units
    pub fn new(api_key: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: cache_dir.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
            timeout: DEFAULT_TIMEOUT,
            units: Units::default(),
        }
    }

    /// Points the client at a different API host (e.g. a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn units(&self) -> Units {
        self.units
    }
}

// The API key stays out of logs and panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("cache_dir", &self.cache_dir)
            .field("cache_ttl", &self.cache_ttl)
            .field("timeout", &self.timeout)
            .field("units", &self.units)
            .finish()
    }
}
