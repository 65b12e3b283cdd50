//! `airdash` - live air quality and weather dashboard
//!
//! This library resolves a city, fetches its air quality and current weather,
//! and renders the combined result as updates for the dashboard page.

pub mod api;
pub mod aqi;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use api::{AirQualityQuery, AirQualitySource, Geocoder, WeatherSource};
pub use aqi::{AqiCategory, CardTone};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use models::{AirQualityReading, DashboardRecord, Location, WeatherReading};
pub use presentation::DomUpdate;
pub use session::{Reaction, Session, UiEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
