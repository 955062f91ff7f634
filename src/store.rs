//! Dataset loading and storage
//!
//! The [`DataStore`] owns the current list of cities and replaces it wholesale on
//! every successful load. Where the document comes from is abstracted behind
//! [`DataSource`] so hosts and tests can plug in HTTP, files or canned data.

use crate::models::{CityWeather, WeatherDocument};
use crate::{Result, WeatherCardsError};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Somewhere a weather document can be fetched from
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch and parse the document
    async fn fetch(&self) -> Result<WeatherDocument>;

    /// Short human-readable description used in logs
    fn describe(&self) -> String;
}

/// Fetches the document over HTTP(S)
pub struct HttpDataSource {
    client: Client,
    url: String,
}

impl HttpDataSource {
    /// Create a source for `url`; without a timeout a hung transport stalls the load
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "WeatherCards/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            WeatherCardsError::config(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self) -> Result<WeatherDocument> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherCardsError::http(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), self.url);
        WeatherDocument::from_slice(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the document from the local filesystem
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch(&self) -> Result<WeatherDocument> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            WeatherCardsError::transport(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        WeatherDocument::from_slice(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Response { status: u16, body: Vec<u8> },
    Unreachable(String),
}

/// Serves a fixed response, the way an HTTP endpoint would
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    canned: Canned,
}

impl StaticDataSource {
    /// A 200 response carrying `document`
    pub fn document(document: &WeatherDocument) -> Result<Self> {
        Ok(Self::response(200, serde_json::to_vec(document)?))
    }

    /// A response with an arbitrary status and raw body
    pub fn response(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            canned: Canned::Response {
                status,
                body: body.into(),
            },
        }
    }

    /// A source whose transport always fails
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            canned: Canned::Unreachable(message.into()),
        }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch(&self) -> Result<WeatherDocument> {
        match &self.canned {
            Canned::Response { status, .. } if !(200..300).contains(status) => {
                Err(WeatherCardsError::http(*status))
            }
            Canned::Response { body, .. } => WeatherDocument::from_slice(body),
            Canned::Unreachable(message) => Err(WeatherCardsError::transport(message.clone())),
        }
    }

    fn describe(&self) -> String {
        "static document".to_string()
    }
}

/// Pick an HTTP source for `http(s)://` locations and a file source otherwise
pub fn source_from_location(
    location: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn DataSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpDataSource::new(location, timeout)?))
    } else {
        if timeout.is_some() {
            warn!("Source timeout ignored for file location {}", location);
        }
        Ok(Box::new(FileDataSource::new(location)))
    }
}

/// Holds the currently loaded cities
pub struct DataStore {
    source: Box<dyn DataSource>,
    cities: RwLock<Arc<[CityWeather]>>,
}

impl DataStore {
    /// Create an empty store backed by `source`
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            cities: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Fetch the document and replace the held cities with it.
    ///
    /// On failure the held cities are left untouched.
    #[instrument(name = "load_dataset", skip(self), fields(source = %self.source.describe()))]
    pub async fn load(&self) -> Result<()> {
        info!("Loading weather data");
        let start_time = Instant::now();

        match self.source.fetch().await {
            Ok(document) => {
                let count = document.cities.len();
                *self.cities.write().unwrap_or_else(PoisonError::into_inner) =
                    Arc::from(document.cities);
                info!(
                    "Loaded {} cities in {:.3}s",
                    count,
                    start_time.elapsed().as_secs_f64()
                );
                Ok(())
            }
            Err(e) => {
                error!("Error loading weather data: {}", e);
                Err(e)
            }
        }
    }

    /// Snapshot of the held cities
    #[must_use]
    pub fn all(&self) -> Arc<[CityWeather]> {
        Arc::clone(&self.cities.read().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn document() -> WeatherDocument {
        WeatherDocument::new(vec![
            CityWeather::new("Paris", "France"),
            CityWeather::new("Porto", "Portugal"),
        ])
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = DataStore::new(Box::new(StaticDataSource::response(200, "{}")));
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn test_load_replaces_cities() {
        let store = DataStore::new(Box::new(StaticDataSource::document(&document()).unwrap()));
        store.load().await.unwrap();
        assert_eq!(store.all().len(), 2);
        assert_eq!(store.all()[1].name, "Porto");
    }

    #[tokio::test]
    async fn test_missing_cities_loads_empty() {
        let store = DataStore::new(Box::new(StaticDataSource::response(200, r#"{"other": 1}"#)));
        assert!(store.load().await.is_ok());
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_leaves_store_empty() {
        let store = DataStore::new(Box::new(StaticDataSource::response(500, "boom")));
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, WeatherCardsError::LoadHttp { status: 500 }));
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn test_parse_error_reported() {
        let store = DataStore::new(Box::new(StaticDataSource::response(200, "not json")));
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, WeatherCardsError::LoadParse { .. }));
    }

    #[tokio::test]
    async fn test_transport_error_reported() {
        let store = DataStore::new(Box::new(StaticDataSource::unreachable("connection reset")));
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, WeatherCardsError::LoadTransport { .. }));
    }

    #[tokio::test]
    async fn test_snapshot_survives_reload() {
        let store = DataStore::new(Box::new(StaticDataSource::document(&document()).unwrap()));
        store.load().await.unwrap();
        let before = store.all();
        store.load().await.unwrap();
        assert_eq!(before.len(), 2);
        assert!(!Arc::ptr_eq(&before, &store.all()));
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&document()).unwrap()).unwrap();

        let source = FileDataSource::new(file.path());
        let doc = source.fetch().await.unwrap();
        assert_eq!(doc, document());
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_transport_error() {
        let source = FileDataSource::new("/definitely/not/here/weather-data.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, WeatherCardsError::LoadTransport { .. }));
    }

    #[test]
    fn test_source_from_location() {
        let http = source_from_location("https://example.com/weather.json", None).unwrap();
        assert_eq!(http.describe(), "https://example.com/weather.json");

        let file = source_from_location("weather-data.json", None).unwrap();
        assert_eq!(file.describe(), "weather-data.json");
    }
}
