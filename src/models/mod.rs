//! Data models for the `WeatherCards` widget
//!
//! - City: one record of current conditions
//! - Document: the JSON document the data source serves

pub mod city;
pub mod document;

pub use city::CityWeather;
pub use document::WeatherDocument;
