//! HTTP request execution for the OpenWeatherMap API
//!
//! Every request carries the API key and the configured unit system. Failures
//! are classified into [`WeatherError`]; [`RequestExecutor::execute`] reports
//! them as a single log line and hands the caller `None` instead.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::io;
use thiserror::Error;

use crate::config::{ClientConfig, Units};

/// Errors that can occur when talking to the weather API
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API rejected the key (HTTP 401)
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Unknown location (HTTP 404)
    #[error("City not found")]
    NotFound,

    /// Too many requests for this key (HTTP 429)
    #[error("API rate limit exceeded")]
    RateLimited,

    /// Any other non-200 status
    #[error("API request failed with status {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The server could not be reached
    #[error("Network connection error")]
    Connection,

    /// Anything else, including a success response that isn't JSON
    #[error("{0}")]
    Unexpected(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The cache directory could not be created
    #[error("Failed to create cache directory: {0}")]
    CacheDir(#[from] io::Error),
}

impl WeatherError {
    /// Classifies a transport-level failure
    fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_connect() {
            WeatherError::Connection
        } else {
            WeatherError::Unexpected(err.to_string())
        }
    }
}

/// Issues GET requests against the configured API host
#[derive(Clone)]
pub struct RequestExecutor {
    client: Client,
    base_url: String,
    api_key: String,
    units: Units,
}

impl RequestExecutor {
    /// Builds an executor whose HTTP client enforces `config.timeout()`
    pub fn new(config: &ClientConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key().to_string(),
            units: config.units(),
        })
    }

    /// Fetches `endpoint` with `params` plus `appid` and `units`
    ///
    /// # Returns
    /// * `Ok(Value)` - The parsed JSON body of a 200 response
    /// * `Err(WeatherError)` - The classified failure
    pub async fn send(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", self.units.as_str())])
            .send()
            .await
            .map_err(WeatherError::from_request)?;

        match response.status() {
            StatusCode::OK => response
                .json::<Value>()
                .await
                .map_err(WeatherError::from_request),
            StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
            StatusCode::NOT_FOUND => Err(WeatherError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(WeatherError::RateLimited),
            status => Err(WeatherError::Status(status.as_u16())),
        }
    }

    /// Like [`send`](Self::send), but logs the failure and returns `None`
    pub async fn execute(&self, endpoint: &str, params: &[(&str, &str)]) -> Option<Value> {
        match self.send(endpoint, params).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!("{}", e);
                None
            }
        }
    }
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
