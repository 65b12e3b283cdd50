//! Data models for the airdash dashboard
//!
//! All records are request-scoped: they are produced by the upstream clients,
//! merged once per load and discarded after rendering.
//! - Location: geocoded coordinates and display name
//! - AirQuality: index, particulates and reporting network
//! - Weather: current conditions in display units
//! - Dashboard: the merged record handed to the presentation layer

pub mod air_quality;
pub mod dashboard;
pub mod location;
pub mod weather;

pub use air_quality::{AirQualityReading, PollutantValue, SourceNetwork};
pub use dashboard::DashboardRecord;
pub use location::Location;
pub use weather::WeatherReading;

/// Round half up, matching how the dashboard has always displayed values
/// (`-2.5` becomes `-2`, `2.5` becomes `3`).
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
