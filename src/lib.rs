//! weathercache library
//!
//! A small OpenWeatherMap client that keeps current-weather responses in a
//! file cache for ten minutes. The binary in `main.rs` is a thin wrapper
//! around [`WeatherClient`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;

pub use cache::{CacheStore, FileCache, MemoryCache};
pub use config::{ClientConfig, Units};
pub use data::{cache_key, location_query, RequestExecutor, WeatherClient, WeatherError};
