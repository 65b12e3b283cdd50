//! AQI categorization
//!
//! Two band tables are in use on the dashboard. [`AqiCategory`] drives the
//! number colour, status label and scale tooltip. [`CardTone`] drives the card
//! background and has no 150 cut but an extra 400 cut. Both are total over
//! every integer index and monotonic in it.

use serde::{Deserialize, Serialize};

/// Upper end of the AQI scale bar
pub const SCALE_MAX: i32 = 500;

/// Health category of an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150, unhealthy for sensitive groups
    UnhealthySensitive,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// above 300
    Hazardous,
}

impl AqiCategory {
    #[must_use]
    pub fn from_index(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthySensitive,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthySensitive => "Unhealthy (SG)",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// CSS colour for the AQI number
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            AqiCategory::Good => "#10b981",
            AqiCategory::Moderate => "#f59e0b",
            AqiCategory::UnhealthySensitive => "#f97316",
            AqiCategory::Unhealthy => "#ef4444",
            AqiCategory::VeryUnhealthy => "#8b5cf6",
            AqiCategory::Hazardous => "#7c3aed",
        }
    }
}

/// Background tone of the AQI card
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardTone {
    Good,
    Moderate,
    Poor,
    Unhealthy,
    Severe,
    Hazardous,
}

impl CardTone {
    #[must_use]
    pub fn from_index(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => CardTone::Good,
            51..=100 => CardTone::Moderate,
            101..=200 => CardTone::Poor,
            201..=300 => CardTone::Unhealthy,
            301..=400 => CardTone::Severe,
            _ => CardTone::Hazardous,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            CardTone::Good => "aqi-good",
            CardTone::Moderate => "aqi-moderate",
            CardTone::Poor => "aqi-poor",
            CardTone::Unhealthy => "aqi-unhealthy",
            CardTone::Severe => "aqi-severe",
            CardTone::Hazardous => "aqi-hazardous",
        }
    }

    /// Full class attribute for the card element
    #[must_use]
    pub fn card_class_name(self) -> String {
        format!("card aqi-effect {}", self.css_class())
    }
}

/// Marker offset along the scale bar, in percent. Indexes outside
/// `0..=SCALE_MAX` pin to the ends.
#[must_use]
pub fn scale_position(aqi: i32) -> f64 {
    let capped = aqi.clamp(0, SCALE_MAX);
    f64::from(capped) / f64::from(SCALE_MAX) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, AqiCategory::Good)]
    #[case(50, AqiCategory::Good)]
    #[case(51, AqiCategory::Moderate)]
    #[case(100, AqiCategory::Moderate)]
    #[case(101, AqiCategory::UnhealthySensitive)]
    #[case(150, AqiCategory::UnhealthySensitive)]
    #[case(151, AqiCategory::Unhealthy)]
    #[case(200, AqiCategory::Unhealthy)]
    #[case(201, AqiCategory::VeryUnhealthy)]
    #[case(300, AqiCategory::VeryUnhealthy)]
    #[case(301, AqiCategory::Hazardous)]
    #[case(999, AqiCategory::Hazardous)]
    fn test_category_boundaries(#[case] aqi: i32, #[case] expected: AqiCategory) {
        assert_eq!(AqiCategory::from_index(aqi), expected);
    }

    #[rstest]
    #[case(50, CardTone::Good)]
    #[case(100, CardTone::Moderate)]
    #[case(150, CardTone::Poor)]
    #[case(200, CardTone::Poor)]
    #[case(300, CardTone::Unhealthy)]
    #[case(400, CardTone::Severe)]
    #[case(401, CardTone::Hazardous)]
    fn test_card_tone_boundaries(#[case] aqi: i32, #[case] expected: CardTone) {
        assert_eq!(CardTone::from_index(aqi), expected);
    }

    #[test]
    fn test_bands_are_monotonic() {
        for aqi in 0..600 {
            assert!(AqiCategory::from_index(aqi) <= AqiCategory::from_index(aqi + 1));
            assert!(CardTone::from_index(aqi) <= CardTone::from_index(aqi + 1));
        }
    }

    #[test]
    fn test_labels_and_colors() {
        let sg = AqiCategory::from_index(120);
        assert_eq!(sg.label(), "Unhealthy (SG)");
        assert_eq!(sg.color(), "#f97316");
        assert_eq!(AqiCategory::Good.color(), "#10b981");
    }

    #[test]
    fn test_card_class_name() {
        assert_eq!(
            CardTone::from_index(350).card_class_name(),
            "card aqi-effect aqi-severe"
        );
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(250, 50.0)]
    #[case(500, 100.0)]
    #[case(-20, 0.0)]
    #[case(742, 100.0)]
    fn test_scale_position(#[case] aqi: i32, #[case] expected: f64) {
        assert!((scale_position(aqi) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_position_is_proportional() {
        for aqi in 0..=SCALE_MAX {
            let expected = f64::from(aqi) / 500.0 * 100.0;
            assert!((scale_position(aqi) - expected).abs() < 1e-9);
        }
    }
}
