//! Configuration management for the airdash dashboard
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Slack on top of the upstream timeouts before a dashboard request is cut off
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Root configuration structure for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Upstream API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Air quality lookup behavior
    #[serde(default)]
    pub air_quality: AirQualityConfig,
    /// Dashboard page behavior
    #[serde(default)]
    pub ui: UiConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// AQICN (WAQI) feed token
    pub aqicn_token: Option<String>,
    /// OpenWeatherMap key, used for geocoding and current weather
    pub openweather_key: Option<String>,
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    #[serde(default = "default_air_quality_base_url")]
    pub air_quality_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// How the air quality feed is keyed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirQualityLookup {
    /// The raw city string the user typed, fetched alongside geocoding
    #[default]
    City,
    /// The geocoder's coordinates, so every source describes the same place
    Coordinates,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityConfig {
    #[serde(default)]
    pub lookup: AirQualityLookup,
}

/// Dashboard page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Message shown in the loading overlay
    #[serde(default = "default_loading_message")]
    pub loading_message: String,
    /// How long the error banner stays visible
    #[serde(default = "default_error_banner_seconds")]
    pub error_banner_seconds: u32,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the dashboard page
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_air_quality_base_url() -> String {
    "https://api.waqi.info".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_loading_message() -> String {
    "Fetching live AQI & weather...".to_string()
}

fn default_error_banner_seconds() -> u32 {
    5
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            aqicn_token: None,
            openweather_key: None,
            geocoding_base_url: default_geocoding_base_url(),
            weather_base_url: default_weather_base_url(),
            air_quality_base_url: default_air_quality_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            loading_message: default_loading_message(),
            error_banner_seconds: default_error_banner_seconds(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `config_path`, or the default location when
    /// `None`, layered under environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // AIRDASH_API__AQICN_TOKEN and friends
        builder = builder.add_source(
            Environment::with_prefix("AIRDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_credential_fallbacks(|name| std::env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("airdash").join("config.toml"))
    }

    /// Fill unset credentials from the conventional `AQICN_TOKEN` and
    /// `OPENWEATHER_KEY` variables
    pub fn apply_credential_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api.aqicn_token.is_none() {
            self.api.aqicn_token = lookup("AQICN_TOKEN");
        }
        if self.api.openweather_key.is_none() {
            self.api.openweather_key = lookup("OPENWEATHER_KEY");
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.geocoding_base_url.is_empty() {
            self.api.geocoding_base_url = default_geocoding_base_url();
        }
        if self.api.weather_base_url.is_empty() {
            self.api.weather_base_url = default_weather_base_url();
        }
        if self.api.air_quality_base_url.is_empty() {
            self.api.air_quality_base_url = default_air_quality_base_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
        if self.ui.error_banner_seconds == 0 {
            self.ui.error_banner_seconds = default_error_banner_seconds();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Credentials are not required up front; calls fail downstream without them.
    pub fn warn_missing_credentials(&self) {
        if self.api.aqicn_token.as_deref().is_none_or(str::is_empty) {
            warn!("No AQICN token configured, air quality lookups will fail");
        }
        if self.api.openweather_key.as_deref().is_none_or(str::is_empty) {
            warn!("No OpenWeatherMap key configured, geocoding and weather lookups will fail");
        }
    }

    /// Upper bound for one dashboard request. A load makes at most two
    /// upstream calls in sequence (geocode, then weather).
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.api.timeout_seconds) * 2 + REQUEST_TIMEOUT_MARGIN_SECS)
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(
                DashboardError::config("API timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(1..=60).contains(&self.ui.error_banner_seconds) {
            return Err(DashboardError::config(
                "Error banner duration must be between 1 and 60 seconds",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("geocoding", &self.api.geocoding_base_url),
            ("weather", &self.api.weather_base_url),
            ("air quality", &self.api.air_quality_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "The {name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.ui.loading_message.trim().is_empty() {
            return Err(DashboardError::config("Loading message cannot be empty").into());
        }

        Ok(())
    }
}
