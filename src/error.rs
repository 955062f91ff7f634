//! Error types and handling for the `WeatherCards` widget

use thiserror::Error;

/// Message shown on the display surface whenever the dataset could not be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load weather data. Please try again.";

/// Main error type for the `WeatherCards` widget
#[derive(Error, Debug)]
pub enum WeatherCardsError {
    /// Network failure while fetching the dataset
    #[error("Transport error: {message}")]
    LoadTransport { message: String },

    /// The data source answered with a non-success HTTP status
    #[error("HTTP error! status: {status}")]
    LoadHttp { status: u16 },

    /// The response body is not valid JSON or has the wrong shape
    #[error("Parse error: {message}")]
    LoadParse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherCardsError {
    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::LoadTransport {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    #[must_use]
    pub fn http(status: u16) -> Self {
        Self::LoadHttp { status }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::LoadParse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherCardsError::LoadTransport { .. }
            | WeatherCardsError::LoadHttp { .. }
            | WeatherCardsError::LoadParse { .. } => LOAD_FAILED_MESSAGE.to_string(),
            WeatherCardsError::Config { message } => {
                format!("Configuration error: {message}")
            }
            WeatherCardsError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WeatherCardsError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::http(status.as_u16()),
            None => Self::transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for WeatherCardsError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let transport = WeatherCardsError::transport("connection refused");
        assert!(matches!(transport, WeatherCardsError::LoadTransport { .. }));

        let http = WeatherCardsError::http(500);
        assert!(matches!(http, WeatherCardsError::LoadHttp { status: 500 }));

        let parse = WeatherCardsError::parse("expected value");
        assert!(matches!(parse, WeatherCardsError::LoadParse { .. }));
    }

    #[test]
    fn test_http_display_contains_status() {
        assert_eq!(
            WeatherCardsError::http(404).to_string(),
            "HTTP error! status: 404"
        );
    }

    #[test]
    fn test_load_errors_share_user_message() {
        for err in [
            WeatherCardsError::transport("x"),
            WeatherCardsError::http(503),
            WeatherCardsError::parse("y"),
        ] {
            assert_eq!(err.user_message(), LOAD_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_config_error_keeps_detail() {
        let err = WeatherCardsError::config("bad debounce");
        assert!(err.user_message().contains("bad debounce"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: WeatherCardsError = json_err.into();
        assert!(matches!(err, WeatherCardsError::LoadParse { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WeatherCardsError = io_err.into();
        assert!(matches!(err, WeatherCardsError::Io { .. }));
    }
}
