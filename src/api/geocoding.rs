//! OpenWeatherMap direct geocoding

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ApiClient, Geocoder, base};
use crate::config::ApiConfig;
use crate::models::Location;
use crate::{DashboardError, Result};

pub const CITY_NOT_FOUND: &str = "City not found";

/// One match from the geocoding endpoint
#[derive(Debug, Deserialize)]
pub struct GeocodingMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
}

impl From<GeocodingMatch> for Location {
    fn from(geocoding: GeocodingMatch) -> Self {
        Location::with_country(geocoding.lat, geocoding.lon, &geocoding.name, &geocoding.country)
    }
}

/// Geocoder backed by the OpenWeatherMap geo API
pub struct OpenWeatherGeocoder {
    http: ApiClient,
    base_url: String,
    api_key: String,
}

impl OpenWeatherGeocoder {
    pub fn new(http: ApiClient, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.geocoding_base_url.clone(),
            api_key: config.openweather_key.clone().unwrap_or_default(),
        }
    }
}

fn direct_url(base_url: &str, city: &str, api_key: &str) -> String {
    format!(
        "{}/geo/1.0/direct?q={}&limit=1&appid={}",
        base(base_url),
        urlencoding::encode(city),
        urlencoding::encode(api_key)
    )
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    #[instrument(skip(self))]
    async fn locate(&self, city: &str) -> Result<Location> {
        let url = direct_url(&self.base_url, city, &self.api_key);
        let body: Value = self.http.get_json(&url).await?;
        let location = parse_geocoding(body)?;
        debug!(
            "Found location: {} ({})",
            location.name,
            location.format_coordinates()
        );
        Ok(location)
    }
}

/// Take the best match from a geocoding payload.
///
/// Anything other than a non-empty array, including the error object the
/// endpoint returns for a bad key, counts as no match.
pub fn parse_geocoding(body: Value) -> Result<Location> {
    let Value::Array(_) = body else {
        warn!("Geocoding response was not a list of matches");
        return Err(DashboardError::not_found(CITY_NOT_FOUND));
    };

    let matches: Vec<GeocodingMatch> = serde_json::from_value(body)
        .map_err(|e| DashboardError::network(format!("Invalid geocoding data: {e}")))?;

    matches
        .into_iter()
        .next()
        .map(Location::from)
        .ok_or_else(|| DashboardError::not_found(CITY_NOT_FOUND))
}
