//! The merged record rendered by the dashboard

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{AirQualityReading, Location, WeatherReading};
use crate::aqi::AqiCategory;

/// Everything one render needs. Only built once every upstream call succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRecord {
    /// Geocoded "City, Country"
    pub name: String,
    pub air_quality: AirQualityReading,
    pub weather: WeatherReading,
}

impl DashboardRecord {
    #[must_use]
    pub fn merge(location: Location, air_quality: AirQualityReading, weather: WeatherReading) -> Self {
        Self {
            name: location.name,
            air_quality,
            weather,
        }
    }
}

impl Display for DashboardRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let aqi = &self.air_quality;
        let category = AqiCategory::from_index(aqi.index);

        writeln!(f, "📍 {}", self.name)?;
        writeln!(f, "   🌫️ AQI {} ({})", aqi.index, category.label())?;
        writeln!(f, "      PM2.5 {} µg/m³ · PM10 {} µg/m³", aqi.pm25, aqi.pm10)?;
        writeln!(f, "      Source: {}", aqi.source)?;
        writeln!(
            f,
            "   🌡️ {} · {}",
            self.weather.format_temperature(),
            self.weather.condition
        )?;
        writeln!(
            f,
            "   💧 {}% · 💨 {} · {}",
            self.weather.humidity,
            self.weather.format_wind(),
            self.weather.format_pressure()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PollutantValue, SourceNetwork};

    fn record() -> DashboardRecord {
        DashboardRecord::merge(
            Location::with_country(19.07, 72.87, "Mumbai", "IN"),
            AirQualityReading {
                index: 162,
                pm25: PollutantValue(Some(162.0)),
                pm10: PollutantValue(None),
                source: SourceNetwork::Cpcb,
            },
            WeatherReading {
                temperature: 31,
                humidity: 70,
                wind_speed_kmh: 36,
                pressure: 1008,
                condition: "Haze".to_string(),
            },
        )
    }

    #[test]
    fn test_merge_takes_geocoded_name() {
        assert_eq!(record().name, "Mumbai, IN");
    }

    #[test]
    fn test_display_summary() {
        let text = record().to_string();
        assert!(text.contains("Mumbai, IN"));
        assert!(text.contains("AQI 162 (Unhealthy)"));
        assert!(text.contains("PM10 -- µg/m³"));
        assert!(text.contains("CPCB (India) via AQICN"));
        assert!(text.contains("36 km/h"));
    }
}
