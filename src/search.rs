//! Case-insensitive substring filtering of city records

use crate::models::CityWeather;
use std::fmt;

/// Normalised search text: trimmed and lower-cased
///
/// An empty query means "show everything".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalise raw input from the search field
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Records whose name or country contains the query, in input order.
///
/// An empty query returns every record.
#[must_use]
pub fn search(records: &[CityWeather], query: &SearchQuery) -> Vec<CityWeather> {
    if query.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|city| city.matches(query.as_str()))
        .cloned()
        .collect()
}
