//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A geocoded city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name, "City, Country"
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
        }
    }

    /// Create a location whose display name joins the resolved city and country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, city: &str, country: &str) -> Self {
        Self::new(latitude, longitude, format!("{city}, {country}"))
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_city_and_country() {
        let location = Location::with_country(19.0760, 72.8777, "Mumbai", "IN");
        assert_eq!(location.name, "Mumbai, IN");
    }

    #[test]
    fn test_format_coordinates() {
        let location = Location::new(48.856_613, 2.352_222, "Paris, FR".to_string());
        assert_eq!(location.format_coordinates(), "48.8566, 2.3522");
    }
}
