//! AQICN (WAQI) city feed

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::{AirQualityQuery, AirQualitySource, ApiClient, base};
use crate::config::ApiConfig;
use crate::models::{AirQualityReading, PollutantValue, SourceNetwork, round_half_up};
use crate::{DashboardError, Result};

pub const AQI_UNAVAILABLE: &str = "AQI data not available";

/// Envelope of every feed response. `data` is an error string unless
/// `status` is `"ok"`.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub status: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct FeedData {
    /// Numeric index, or `"-"` when the station is offline
    pub aqi: Value,
    #[serde(default)]
    pub iaqi: HashMap<String, IaqiEntry>,
    pub city: FeedCity,
}

/// One individual pollutant sub-index
#[derive(Debug, Deserialize)]
pub struct IaqiEntry {
    pub v: f64,
}

#[derive(Debug, Deserialize)]
pub struct FeedCity {
    pub name: String,
}

/// Air quality source backed by api.waqi.info
pub struct WaqiClient {
    http: ApiClient,
    base_url: String,
    token: String,
}

impl WaqiClient {
    pub fn new(http: ApiClient, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.air_quality_base_url.clone(),
            token: config.aqicn_token.clone().unwrap_or_default(),
        }
    }
}

fn feed_url(base_url: &str, query: &AirQualityQuery, token: &str) -> String {
    let station = match query {
        AirQualityQuery::City(city) => urlencoding::encode(city).into_owned(),
        AirQualityQuery::Coordinates {
            latitude,
            longitude,
        } => format!("geo:{latitude};{longitude}"),
    };
    format!(
        "{}/feed/{}/?token={}",
        base(base_url),
        station,
        urlencoding::encode(token)
    )
}

#[async_trait]
impl AirQualitySource for WaqiClient {
    #[instrument(skip(self))]
    async fn reading(&self, query: &AirQualityQuery) -> Result<AirQualityReading> {
        let url = feed_url(&self.base_url, query, &self.token);
        let response: FeedResponse = self.http.get_json(&url).await?;
        let reading = parse_feed(response)?;
        debug!("AQI {} from {}", reading.index, reading.source);
        Ok(reading)
    }
}

/// Extract the reading from a feed response
pub fn parse_feed(response: FeedResponse) -> Result<AirQualityReading> {
    if response.status != "ok" {
        debug!("Feed reported status '{}': {}", response.status, response.data);
        return Err(DashboardError::data_unavailable(AQI_UNAVAILABLE));
    }

    let data: FeedData = serde_json::from_value(response.data)
        .map_err(|e| DashboardError::network(format!("Invalid air quality data: {e}")))?;

    let index = data
        .aqi
        .as_i64()
        .or_else(|| data.aqi.as_f64().map(round_half_up))
        .ok_or_else(|| DashboardError::data_unavailable(AQI_UNAVAILABLE))?;

    let pollutant = |key: &str| PollutantValue(data.iaqi.get(key).map(|entry| entry.v));

    Ok(AirQualityReading {
        index: i32::try_from(index).unwrap_or(i32::MAX),
        pm25: pollutant("pm25"),
        pm10: pollutant("pm10"),
        source: SourceNetwork::classify(&data.city.name),
    })
}
