//! Upstream API clients
//!
//! Three providers feed the dashboard: OpenWeatherMap geocoding, the AQICN
//! (WAQI) city feed and OpenWeatherMap current weather. Each sits behind a
//! trait so the orchestrator can be driven by fakes in tests.
//!
//! Requests are made exactly once. Success is decided from the JSON body
//! rather than the HTTP status, because the providers report their own
//! failures in-band (`status`, `cod`).

pub mod air_quality;
pub mod geocoding;
pub mod weather;

use crate::config::ApiConfig;
use crate::models::{AirQualityReading, Location, WeatherReading};
use crate::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

pub use air_quality::WaqiClient;
pub use geocoding::OpenWeatherGeocoder;
pub use weather::OpenWeatherClient;

/// Responses slower than this are logged as warnings
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Query parameters that carry credentials
const SECRET_PARAMS: [&str; 2] = ["appid", "token"];

/// Resolves free text to a single best-match location
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, city: &str) -> Result<Location>;
}

/// How an air quality feed is looked up
#[derive(Debug, Clone, PartialEq)]
pub enum AirQualityQuery {
    /// Free text, as typed by the user
    City(String),
    /// Nearest station to a point
    Coordinates { latitude: f64, longitude: f64 },
}

/// Current air quality for a place
#[async_trait]
pub trait AirQualitySource: Send + Sync {
    async fn reading(&self, query: &AirQualityQuery) -> Result<AirQualityReading>;
}

/// Current weather at a point
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReading>;
}

/// Shared HTTP client for all providers
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new client honoring the configured timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("airdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET `url` and decode the JSON body, whatever the status code
    #[instrument(skip(self, url), fields(url = %redact(url)))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("HTTP response received: {}", status);

        let body = response.json::<T>().await?;
        let total_duration = start_time.elapsed();

        info!(
            "Upstream request finished in {:.3}s (HTTP {})",
            total_duration.as_secs_f64(),
            status.as_u16()
        );

        if total_duration > SLOW_RESPONSE {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}

/// Mask credential query parameters so urls can be logged
#[must_use]
pub fn redact(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_PARAMS.contains(&key) => format!("{key}=***"),
            _ => pair.to_string(),
        })
        .collect();

    format!("{base}?{}", params.join("&"))
}

/// Trim a configured base url so paths can be appended
pub(crate) fn base(url: &str) -> &str {
    url.trim_end_matches('/')
}
