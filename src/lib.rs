//! `WeatherCards` - City weather cards with debounced live search
//!
//! This library loads a static list of city weather records, renders them as
//! HTML cards and filters them by name or country as the user types.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod search;
pub mod store;
pub mod ui;

// Re-export core types for public API
pub use config::WeatherCardsConfig;
pub use controller::{Controller, ControllerState};
pub use debounce::{Debounce, Debouncer};
pub use error::WeatherCardsError;
pub use models::{CityWeather, WeatherDocument};
pub use render::Renderer;
pub use sanitize::escape_html;
pub use search::{SearchQuery, search};
pub use store::{DataSource, DataStore, FileDataSource, HttpDataSource, StaticDataSource};
pub use ui::{FileSurface, InputEvent, RecordingSurface, Surface};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherCardsError>;
