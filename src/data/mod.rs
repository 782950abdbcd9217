//! Current-weather lookups against the OpenWeatherMap API
//!
//! [`RequestExecutor`] talks HTTP and classifies failures, [`WeatherClient`]
//! puts a cache in front of it. The helpers here derive the cache key and the
//! `q` query parameter from a city and optional country code.

pub mod request;
pub mod weather;

pub use request::{RequestExecutor, WeatherError};
pub use weather::WeatherClient;

/// Path of the current-weather endpoint, relative to the base URL
pub const CURRENT_WEATHER_ENDPOINT: &str = "weather";

/// Returns the country code if it carries any text
fn non_empty(country_code: Option<&str>) -> Option<&str> {
    country_code.filter(|code| !code.is_empty())
}

/// Cache key for the current weather in `city`
///
/// `current_` followed by the `q` parameter sent upstream, so two lookups
/// share an entry exactly when they send the same query. `("Paris", None)`
/// gives `current_Paris`, `("Paris", Some("FR"))` gives `current_Paris,FR`
/// and neither can collide with a city named `Paris_FR`. An empty country
/// code counts as none.
pub fn cache_key(city: &str, country_code: Option<&str>) -> String {
    format!("current_{}", location_query(city, country_code))
}

/// Value of the `q` query parameter: `city` or `city,country_code`
pub fn location_query(city: &str, country_code: Option<&str>) -> String {
    match non_empty(country_code) {
        Some(code) => format!("{},{}", city, code),
        None => city.to_string(),
    }
}
