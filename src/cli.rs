//! Command-line interface parsing for weathercache
//!
//! Turns arguments (and the `OPENWEATHER_API_KEY` environment variable) into
//! the configuration the weather client is built from.

use clap::Parser;
use directories::ProjectDirs;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::{ClientConfig, Units, DEFAULT_BASE_URL};

/// Cache directory used when the platform cache location can't be determined
pub const FALLBACK_CACHE_DIR: &str = "data/cache";

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--api-key` nor `OPENWEATHER_API_KEY` was provided
    #[error("Missing API key: pass --api-key or set OPENWEATHER_API_KEY")]
    MissingApiKey,

    /// The city argument was blank
    #[error("City name must not be empty")]
    EmptyCity,
}

/// Current weather from OpenWeatherMap, cached on disk
#[derive(Parser)]
#[command(name = "weathercache")]
#[command(about = "Current weather from OpenWeatherMap, cached on disk")]
#[command(version)]
pub struct Cli {
    /// City to look up
    pub city: String,

    /// Country code used to disambiguate the city (e.g. FR, US)
    #[arg(short, long, value_name = "CODE")]
    pub country: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the weather API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for cached responses [default: platform cache directory]
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Unit system for temperatures and speeds
    #[arg(long, value_enum, default_value_t = Units::Metric)]
    pub units: Units,

    /// Print the payload on a single line
    #[arg(long)]
    pub compact: bool,
}

// The API key may come from the environment; keep it out of debug output.
impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("city", &self.city)
            .field("country", &self.country)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("cache_dir", &self.cache_dir)
            .field("units", &self.units)
            .field("compact", &self.compact)
            .finish()
    }
}

/// Everything `main` needs to run one lookup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Configuration for the weather client
    pub client: ClientConfig,
    /// City to look up, trimmed
    pub city: String,
    /// Optional country code, `None` when blank
    pub country_code: Option<String>,
    /// Whether to print compact JSON
    pub compact: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the client configuration filled in
    /// * `Err(CliError)` if the API key is missing or the city is blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        let city = cli.city.trim();
        if city.is_empty() {
            return Err(CliError::EmptyCity);
        }

        let country_code = cli
            .country
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);

        let cache_dir = cli.cache_dir.clone().unwrap_or_else(default_cache_dir);

        let client = ClientConfig::new(api_key, cache_dir)
            .with_base_url(cli.base_url.clone())
            .with_units(cli.units);

        Ok(StartupConfig {
            client,
            city: city.to_string(),
            country_code,
            compact: cli.compact,
        })
    }
}

/// XDG-compliant cache directory (`~/.cache/weathercache/` on Linux), or
/// [`FALLBACK_CACHE_DIR`] when there is no home directory
pub fn default_cache_dir() -> PathBuf {
    ProjectDirs::from("", "", "weathercache")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
}
