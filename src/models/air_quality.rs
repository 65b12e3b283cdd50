//! Air quality reading model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of a pollutant the station does not report
pub const MISSING_READING: &str = "--";

/// Network that produced an air quality reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceNetwork {
    /// India's Central Pollution Control Board, relayed by AQICN
    Cpcb,
    /// Everything else AQICN aggregates
    Global,
}

impl SourceNetwork {
    /// Classify a station by the city name the feed resolved to
    #[must_use]
    pub fn classify(station_city: &str) -> Self {
        let name = station_city.to_lowercase();
        if name.contains("india") || name.contains(", in") {
            SourceNetwork::Cpcb
        } else {
            SourceNetwork::Global
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SourceNetwork::Cpcb => "CPCB (India) via AQICN",
            SourceNetwork::Global => "AQICN Global Monitoring Network",
        }
    }
}

impl fmt::Display for SourceNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Concentration in µg/m³, absent when the station does not report it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantValue(pub Option<f64>);

impl fmt::Display for PollutantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(MISSING_READING),
        }
    }
}

/// Current air quality for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// Overall AQI, conventionally 0-500
    pub index: i32,
    pub pm25: PollutantValue,
    pub pm10: PollutantValue,
    pub source: SourceNetwork,
}
