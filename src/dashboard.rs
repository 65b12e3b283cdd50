//! Dashboard orchestration
//!
//! Loads one city by combining the geocoder, the air quality feed and the
//! weather endpoint into a single [`DashboardRecord`]. A record only exists
//! once every call has succeeded, so a failed load never yields partial data.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::api::{
    AirQualityQuery, AirQualitySource, ApiClient, Geocoder, OpenWeatherClient,
    OpenWeatherGeocoder, WaqiClient, WeatherSource,
};
use crate::config::{AirQualityLookup, DashboardConfig};
use crate::models::{AirQualityReading, DashboardRecord, Location, WeatherReading};
use crate::{DashboardError, Result};

/// Loads dashboard records and remembers the last city that loaded
pub struct Dashboard {
    geocoder: Arc<dyn Geocoder>,
    air_quality: Arc<dyn AirQualitySource>,
    weather: Arc<dyn WeatherSource>,
    lookup: AirQualityLookup,
    current_city: RwLock<Option<String>>,
}

impl Dashboard {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        air_quality: Arc<dyn AirQualitySource>,
        weather: Arc<dyn WeatherSource>,
        lookup: AirQualityLookup,
    ) -> Self {
        Self {
            geocoder,
            air_quality,
            weather,
            lookup,
            current_city: RwLock::new(None),
        }
    }

    /// Wire up the live providers
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let http = ApiClient::new(&config.api)?;

        Ok(Self::new(
            Arc::new(OpenWeatherGeocoder::new(http.clone(), &config.api)),
            Arc::new(WaqiClient::new(http.clone(), &config.api)),
            Arc::new(OpenWeatherClient::new(http, &config.api)),
            config.air_quality.lookup,
        ))
    }

    /// City of the last successful load
    pub async fn current_city(&self) -> Option<String> {
        self.current_city.read().await.clone()
    }

    /// Fetch everything for `city` and remember it for refreshes.
    ///
    /// The load fails with the first error in lookup order (geocoder, air
    /// quality, weather), unchanged.
    pub async fn load_city(&self, city: &str) -> Result<DashboardRecord> {
        let record = self.fetch(city).await?;
        self.remember(city).await;
        Ok(record)
    }

    /// Like [`Dashboard::load_city`], without touching the current city
    #[instrument(skip(self))]
    pub async fn fetch(&self, city: &str) -> Result<DashboardRecord> {
        let (location, air_quality, weather) = match self.lookup {
            AirQualityLookup::City => self.fetch_by_city(city).await,
            AirQualityLookup::Coordinates => self.fetch_by_location(city).await,
        }
        .inspect_err(|e| warn!("Load failed for '{}': {}", city, e))?;

        let record = DashboardRecord::merge(location, air_quality, weather);
        info!("Loaded {} (AQI {})", record.name, record.air_quality.index);
        Ok(record)
    }

    /// Make `city` the one [`Dashboard::refresh`] reloads
    pub async fn remember(&self, city: &str) {
        *self.current_city.write().await = Some(city.to_string());
    }

    /// Reload the last successful city, if there is one
    pub async fn refresh(&self) -> Option<Result<DashboardRecord>> {
        let city = self.current_city().await?;
        Some(self.load_city(&city).await)
    }

    /// The feed is keyed by the typed city, so it runs alongside the
    /// geocode -> weather chain. Both sides are awaited so a geocoding
    /// failure is reported even when the feed fails sooner.
    async fn fetch_by_city(
        &self,
        city: &str,
    ) -> Result<(Location, AirQualityReading, WeatherReading)> {
        let query = AirQualityQuery::City(city.to_string());

        let located_weather = async {
            let location = self.geocoder.locate(city).await?;
            let weather = self
                .weather
                .current(location.latitude, location.longitude)
                .await;
            Ok::<_, DashboardError>((location, weather))
        };

        let (located, air_quality) =
            tokio::join!(located_weather, self.air_quality.reading(&query));

        let (location, weather) = located?;
        let air_quality = air_quality?;
        let weather = weather?;

        Ok((location, air_quality, weather))
    }

    /// Both lookups hang off the geocoded point, so all three sources
    /// describe the same place.
    async fn fetch_by_location(
        &self,
        city: &str,
    ) -> Result<(Location, AirQualityReading, WeatherReading)> {
        let location = self.geocoder.locate(city).await?;
        debug!("Resolved '{}' to {}", city, location.format_coordinates());

        let query = AirQualityQuery::Coordinates {
            latitude: location.latitude,
            longitude: location.longitude,
        };

        let (air_quality, weather) = tokio::join!(
            self.air_quality.reading(&query),
            self.weather.current(location.latitude, location.longitude)
        );

        Ok((location, air_quality?, weather?))
    }
}
