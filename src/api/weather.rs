//! OpenWeatherMap current weather

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ApiClient, WeatherSource, base};
use crate::config::ApiConfig;
use crate::models::{WeatherReading, round_half_up};
use crate::{DashboardError, Result};

pub const WEATHER_UNAVAILABLE: &str = "Weather data not available";

/// Status code the endpoint reports in-band on success
const COD_OK: i64 = 200;

/// Current weather response. Only `cod` is guaranteed on failure.
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    /// 200 as a number on success, often a string such as `"404"` on failure
    #[serde(default)]
    pub cod: Value,
    pub main: Option<MainData>,
    pub wind: Option<WindData>,
    #[serde(default)]
    pub weather: Vec<ConditionData>,
}

#[derive(Debug, Deserialize)]
pub struct MainData {
    /// Celsius with `units=metric`
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindData {
    /// m/s with `units=metric`
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionData {
    pub main: String,
}

/// Weather source backed by the OpenWeatherMap 2.5 API
pub struct OpenWeatherClient {
    http: ApiClient,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(http: ApiClient, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.weather_base_url.clone(),
            api_key: config.openweather_key.clone().unwrap_or_default(),
        }
    }
}

fn current_url(base_url: &str, latitude: f64, longitude: f64, api_key: &str) -> String {
    format!(
        "{}/data/2.5/weather?lat={latitude}&lon={longitude}&units=metric&appid={}",
        base(base_url),
        urlencoding::encode(api_key)
    )
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReading> {
        let url = current_url(&self.base_url, latitude, longitude, &self.api_key);
        let response: CurrentResponse = self.http.get_json(&url).await?;
        let reading = parse_current(response)?;
        debug!(
            "Weather: {} at {}",
            reading.condition,
            reading.format_temperature()
        );
        Ok(reading)
    }
}

/// Convert a current weather response to display units
pub fn parse_current(response: CurrentResponse) -> Result<WeatherReading> {
    if response.cod.as_i64() != Some(COD_OK) {
        debug!("Weather endpoint reported cod {}", response.cod);
        return Err(DashboardError::data_unavailable(WEATHER_UNAVAILABLE));
    }

    let (Some(main), Some(wind)) = (response.main, response.wind) else {
        return Err(DashboardError::network(
            "Invalid weather data: missing main or wind section",
        ));
    };

    Ok(WeatherReading {
        temperature: round_half_up(main.temp),
        humidity: round_half_up(main.humidity),
        wind_speed_kmh: round_half_up(WeatherReading::ms_to_kmh(wind.speed)),
        pressure: round_half_up(main.pressure),
        condition: response
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.main)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> CurrentResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_parse_current_weather() {
        let reading = parse_current(response(json!({
            "cod": 200,
            "main": {"temp": 21.6, "humidity": 64, "pressure": 1012},
            "wind": {"speed": 10.0},
            "weather": [{"main": "Clouds"}, {"main": "Mist"}]
        })))
        .unwrap();

        assert_eq!(reading.temperature, 22);
        assert_eq!(reading.humidity, 64);
        assert_eq!(reading.wind_speed_kmh, 36);
        assert_eq!(reading.pressure, 1012);
        assert_eq!(reading.condition, "Clouds");
    }

    #[test]
    fn test_negative_temperature_rounds_half_up() {
        let reading = parse_current(response(json!({
            "cod": 200,
            "main": {"temp": -2.5, "humidity": 90, "pressure": 1030},
            "wind": {"speed": 0.5},
            "weather": [{"main": "Snow"}]
        })))
        .unwrap();
        assert_eq!(reading.temperature, -2);
        assert_eq!(reading.wind_speed_kmh, 2);
    }

    #[test]
    fn test_failure_cod_is_unavailable() {
        let err = parse_current(response(json!({"cod": "404", "message": "city not found"})))
            .unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable { .. }));
        assert_eq!(err.to_string(), "Weather data not available");

        let err = parse_current(response(json!({"cod": 401, "message": "Invalid API key"})))
            .unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable { .. }));
    }

    #[test]
    fn test_missing_condition_is_empty() {
        let reading = parse_current(response(json!({
            "cod": 200,
            "main": {"temp": 10, "humidity": 50, "pressure": 1000},
            "wind": {"speed": 1},
            "weather": []
        })))
        .unwrap();
        assert_eq!(reading.condition, "");
    }

    #[test]
    fn test_current_url() {
        assert_eq!(
            current_url("https://api.openweathermap.org", 48.85, 2.35, "k"),
            "https://api.openweathermap.org/data/2.5/weather?lat=48.85&lon=2.35&units=metric&appid=k"
        );
    }
}
