//! City weather record as delivered by the data source

use serde::{Deserialize, Serialize};

/// Current conditions for one city
///
/// Records carry no identity beyond the (name, country) pair; duplicates are kept
/// and rendered independently.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityWeather {
    /// City name
    pub name: String,
    /// Country name
    pub country: String,
    /// Display glyph, usually an emoji
    pub icon: String,
    /// Human-readable condition, e.g. "Partly Cloudy"
    pub condition: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Apparent temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
}

impl CityWeather {
    /// Create a record with the given identity and neutral measurements
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            icon: String::new(),
            condition: String::new(),
            temperature: 0.0,
            feels_like: 0.0,
            humidity: 0.0,
            wind_speed: 0.0,
        }
    }

    /// Whether the lower-cased name or country contains `needle`
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.country.to_lowercase().contains(needle)
    }
}
