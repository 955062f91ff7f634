//! Wire shape of the weather JSON document

use serde::{Deserialize, Serialize};

use super::CityWeather;

/// Top-level `{ "cities": [...] }` document
///
/// A missing `cities` key yields an empty list rather than an error.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeatherDocument {
    #[serde(default)]
    pub cities: Vec<CityWeather>,
}

impl WeatherDocument {
    #[must_use]
    pub fn new(cities: Vec<CityWeather>) -> Self {
        Self { cities }
    }

    /// Parse a response body
    pub fn from_slice(body: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherCardsError;

    #[test]
    fn test_missing_cities_is_empty() {
        let doc = WeatherDocument::from_slice(br#"{"updated": "today"}"#).unwrap();
        assert!(doc.cities.is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = WeatherDocument::from_slice(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, WeatherCardsError::LoadParse { .. }));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        let err = WeatherDocument::from_slice(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, WeatherCardsError::LoadParse { .. }));
    }

    #[test]
    fn test_cities_keep_document_order() {
        let body = r#"{"cities": [
            {"name":"Oslo","country":"Norway","icon":"\u2744\ufe0f","condition":"Snow","temperature":-3,"feelsLike":-8,"humidity":80,"windSpeed":20},
            {"name":"Rome","country":"Italy","icon":"\u2600\ufe0f","condition":"Sunny","temperature":24,"feelsLike":25,"humidity":35,"windSpeed":6}
        ]}"#;
        let doc = WeatherDocument::from_slice(body.as_bytes()).unwrap();
        let names: Vec<_> = doc.cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Oslo", "Rome"]);
        assert_eq!(doc.cities[0].icon, "\u{2744}\u{fe0f}");
    }
}
