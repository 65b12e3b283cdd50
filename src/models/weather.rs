//! Current weather model and display methods

use serde::{Deserialize, Serialize};

/// Current conditions, already converted to display units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Temperature in Celsius, rounded
    pub temperature: i64,
    /// Relative humidity in percent
    pub humidity: i64,
    /// Wind speed in km/h, rounded
    pub wind_speed_kmh: i64,
    /// Sea-level pressure in hPa
    pub pressure: i64,
    /// Short condition label, e.g. "Clouds"
    pub condition: String,
}

impl WeatherReading {
    /// Convert a wind speed from m/s to km/h
    #[must_use]
    pub fn ms_to_kmh(speed_ms: f64) -> f64 {
        speed_ms * 3.6
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temperature)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{} km/h", self.wind_speed_kmh)
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("{} hPa", self.pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::round_half_up;

    #[test]
    fn test_wind_conversion() {
        assert_eq!(round_half_up(WeatherReading::ms_to_kmh(10.0)), 36);
        assert_eq!(round_half_up(WeatherReading::ms_to_kmh(4.12)), 15);
        assert_eq!(round_half_up(WeatherReading::ms_to_kmh(0.0)), 0);
    }

    #[test]
    fn test_formatting() {
        let weather = WeatherReading {
            temperature: -3,
            humidity: 81,
            wind_speed_kmh: 36,
            pressure: 1013,
            condition: "Snow".to_string(),
        };
        assert_eq!(weather.format_temperature(), "-3°C");
        assert_eq!(weather.format_wind(), "36 km/h");
        assert_eq!(weather.format_pressure(), "1013 hPa");
    }
}
