//! Presentation layer
//!
//! Maps a [`DashboardRecord`] and the overlay state onto the dashboard page.
//! The page is a fixed set of elements, so a render is an ordered list of
//! [`DomUpdate`]s that the page script applies verbatim.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::aqi::{AqiCategory, CardTone, scale_position};
use crate::models::DashboardRecord;

/// Element ids on the dashboard page
pub mod elements {
    pub const CITY_SEARCH: &str = "citySearch";
    pub const SEARCH_BUTTON: &str = "searchBtn";
    pub const REFRESH_BUTTON: &str = "refreshBtn";
    pub const LOADING_OVERLAY: &str = "loadingOverlay";
    pub const LOADING_MESSAGE: &str = "loadingMessage";
    pub const ERROR_MESSAGE: &str = "errorMessage";
    pub const ERROR_TEXT: &str = "errorText";
    pub const LOCATION: &str = "location";
    pub const AQI_NUMBER: &str = "aqiNumber";
    pub const AQI_STATUS: &str = "aqiStatus";
    pub const AQI_CARD: &str = "aqiCard";
    pub const AQI_SOURCE: &str = "aqiSource";
    pub const PM25_VALUE: &str = "pm25Value";
    pub const PM10_VALUE: &str = "pm10Value";
    pub const TEMPERATURE: &str = "temperature";
    pub const HUMIDITY: &str = "humidity";
    pub const WIND_SPEED: &str = "windSpeed";
    pub const PRESSURE: &str = "pressure";
    pub const WEATHER_CONDITION: &str = "weatherCondition";
    pub const LAST_UPDATED: &str = "lastUpdated";
    pub const SCALE_MARKER: &str = "scaleMarker";
    pub const SCALE_TOOLTIP: &str = "scaleTooltip";
}

use elements::*;

/// One mutation of one page element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomUpdate {
    /// Replace the element's text content
    Text { id: String, value: String },
    /// Replace the element's inner HTML
    Html { id: String, value: String },
    /// Set one inline style property
    Style {
        id: String,
        property: String,
        value: String,
    },
    /// Replace the element's class attribute
    ClassName { id: String, value: String },
}

impl DomUpdate {
    pub fn text(id: &str, value: impl Into<String>) -> Self {
        DomUpdate::Text {
            id: id.to_string(),
            value: value.into(),
        }
    }

    pub fn html(id: &str, value: impl Into<String>) -> Self {
        DomUpdate::Html {
            id: id.to_string(),
            value: value.into(),
        }
    }

    pub fn style(id: &str, property: &str, value: impl Into<String>) -> Self {
        DomUpdate::Style {
            id: id.to_string(),
            property: property.to_string(),
            value: value.into(),
        }
    }

    pub fn class_name(id: &str, value: impl Into<String>) -> Self {
        DomUpdate::ClassName {
            id: id.to_string(),
            value: value.into(),
        }
    }

    /// Element this update targets
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            DomUpdate::Text { id, .. }
            | DomUpdate::Html { id, .. }
            | DomUpdate::Style { id, .. }
            | DomUpdate::ClassName { id, .. } => id,
        }
    }
}

fn with_unit(value: impl std::fmt::Display, class: &str, unit: &str) -> String {
    format!(r#"{value}<span class="{class}">{unit}</span>"#)
}

fn pollutant(value: impl std::fmt::Display) -> String {
    with_unit(value, "pollutant-unit", "µg/m³")
}

fn weather(value: impl std::fmt::Display, unit: &str) -> String {
    with_unit(value, "weather-unit", unit)
}

/// Render a full dashboard. `updated_at` is the local wall-clock time of
/// the render.
#[must_use]
pub fn render_dashboard(record: &DashboardRecord, updated_at: NaiveTime) -> Vec<DomUpdate> {
    let aqi = &record.air_quality;
    let category = AqiCategory::from_index(aqi.index);
    let conditions = &record.weather;

    let mut updates = vec![
        DomUpdate::text(LOCATION, &record.name),
        DomUpdate::text(AQI_NUMBER, aqi.index.to_string()),
        DomUpdate::text(AQI_STATUS, category.label()),
        DomUpdate::style(AQI_NUMBER, "color", category.color()),
        DomUpdate::text(AQI_SOURCE, aqi.source.label()),
        DomUpdate::html(PM25_VALUE, pollutant(aqi.pm25)),
        DomUpdate::html(PM10_VALUE, pollutant(aqi.pm10)),
        DomUpdate::html(TEMPERATURE, weather(conditions.temperature, "°C")),
        DomUpdate::html(HUMIDITY, weather(conditions.humidity, "%")),
        DomUpdate::html(WIND_SPEED, weather(conditions.wind_speed_kmh, "km/h")),
        DomUpdate::html(PRESSURE, weather(conditions.pressure, "hPa")),
        DomUpdate::text(WEATHER_CONDITION, &conditions.condition),
        DomUpdate::class_name(AQI_CARD, CardTone::from_index(aqi.index).card_class_name()),
    ];
    updates.extend(render_scale_marker(aqi.index));
    updates.push(render_last_updated(updated_at));
    updates
}

/// Position the scale marker and describe it in the tooltip
#[must_use]
pub fn render_scale_marker(aqi: i32) -> Vec<DomUpdate> {
    let category = AqiCategory::from_index(aqi);
    vec![
        DomUpdate::style(SCALE_MARKER, "left", format!("{}%", scale_position(aqi))),
        DomUpdate::html(
            SCALE_TOOLTIP,
            format!("<strong>AQI: {aqi}</strong><br>{}", category.label()),
        ),
    ]
}

#[must_use]
pub fn render_last_updated(updated_at: NaiveTime) -> DomUpdate {
    DomUpdate::text(
        LAST_UPDATED,
        format!("Updated: {}", updated_at.format("%H:%M")),
    )
}

#[must_use]
pub fn show_loading(message: &str) -> Vec<DomUpdate> {
    vec![
        DomUpdate::text(LOADING_MESSAGE, message),
        DomUpdate::style(LOADING_OVERLAY, "display", "flex"),
    ]
}

#[must_use]
pub fn hide_loading() -> Vec<DomUpdate> {
    vec![DomUpdate::style(LOADING_OVERLAY, "display", "none")]
}

#[must_use]
pub fn show_error(message: &str) -> Vec<DomUpdate> {
    vec![
        DomUpdate::text(ERROR_TEXT, message),
        DomUpdate::style(ERROR_MESSAGE, "display", "flex"),
    ]
}

#[must_use]
pub fn hide_error() -> Vec<DomUpdate> {
    vec![DomUpdate::style(ERROR_MESSAGE, "display", "none")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AirQualityReading, Location, PollutantValue, SourceNetwork, WeatherReading,
    };

    fn record(index: i32) -> DashboardRecord {
        DashboardRecord::merge(
            Location::with_country(28.61, 77.2, "New Delhi", "IN"),
            AirQualityReading {
                index,
                pm25: PollutantValue(Some(212.0)),
                pm10: PollutantValue(None),
                source: SourceNetwork::Cpcb,
            },
            WeatherReading {
                temperature: 24,
                humidity: 45,
                wind_speed_kmh: 36,
                pressure: 1011,
                condition: "Haze".to_string(),
            },
        )
    }

    fn find<'a>(updates: &'a [DomUpdate], id: &str) -> Vec<&'a DomUpdate> {
        updates.iter().filter(|u| u.target() == id).collect()
    }

    fn morning() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 5, 0).unwrap()
    }

    #[test]
    fn test_render_text_fields() {
        let updates = render_dashboard(&record(212), morning());

        assert!(updates.contains(&DomUpdate::text(LOCATION, "New Delhi, IN")));
        assert!(updates.contains(&DomUpdate::text(AQI_NUMBER, "212")));
        assert!(updates.contains(&DomUpdate::text(AQI_STATUS, "Very Unhealthy")));
        assert!(updates.contains(&DomUpdate::style(AQI_NUMBER, "color", "#8b5cf6")));
        assert!(updates.contains(&DomUpdate::text(WEATHER_CONDITION, "Haze")));
        assert!(updates.contains(&DomUpdate::text(LAST_UPDATED, "Updated: 09:05")));
    }

    #[test]
    fn test_render_units() {
        let updates = render_dashboard(&record(212), morning());

        assert!(updates.contains(&DomUpdate::html(
            PM25_VALUE,
            r#"212<span class="pollutant-unit">µg/m³</span>"#
        )));
        assert!(updates.contains(&DomUpdate::html(
            PM10_VALUE,
            r#"--<span class="pollutant-unit">µg/m³</span>"#
        )));
        assert!(updates.contains(&DomUpdate::html(
            WIND_SPEED,
            r#"36<span class="weather-unit">km/h</span>"#
        )));
        assert!(updates.contains(&DomUpdate::html(
            TEMPERATURE,
            r#"24<span class="weather-unit">°C</span>"#
        )));
    }

    #[test]
    fn test_card_uses_its_own_bands() {
        // 120 is "Unhealthy (SG)" as text but a "poor" card
        let updates = render_dashboard(&record(120), morning());
        assert!(updates.contains(&DomUpdate::text(AQI_STATUS, "Unhealthy (SG)")));
        assert_eq!(
            find(&updates, AQI_CARD),
            vec![&DomUpdate::class_name(AQI_CARD, "card aqi-effect aqi-poor")]
        );
    }

    #[test]
    fn test_scale_marker() {
        let updates = render_scale_marker(250);
        assert_eq!(updates[0], DomUpdate::style(SCALE_MARKER, "left", "50%"));
        assert_eq!(
            updates[1],
            DomUpdate::html(SCALE_TOOLTIP, "<strong>AQI: 250</strong><br>Very Unhealthy")
        );

        let updates = render_scale_marker(650);
        assert_eq!(updates[0], DomUpdate::style(SCALE_MARKER, "left", "100%"));
        assert!(matches!(&updates[1], DomUpdate::Html { value, .. } if value.contains("AQI: 650")));
    }

    #[test]
    fn test_overlays() {
        assert_eq!(
            show_loading("Loading..."),
            vec![
                DomUpdate::text(LOADING_MESSAGE, "Loading..."),
                DomUpdate::style(LOADING_OVERLAY, "display", "flex"),
            ]
        );
        assert_eq!(
            hide_loading(),
            vec![DomUpdate::style(LOADING_OVERLAY, "display", "none")]
        );
        assert_eq!(show_error("City not found")[0], DomUpdate::text(ERROR_TEXT, "City not found"));
        assert_eq!(
            hide_error(),
            vec![DomUpdate::style(ERROR_MESSAGE, "display", "none")]
        );
    }

    #[test]
    fn test_updates_serialize_tagged() {
        let json = serde_json::to_value(DomUpdate::style(SCALE_MARKER, "left", "42%")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"op": "style", "id": "scaleMarker", "property": "left", "value": "42%"})
        );
    }
}
