//! Error types and utilities for AirPulse

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for AirPulse operations
pub type Result<T> = std::result::Result<T, DashboardError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failures while loading the tweet dataset.
///
/// A load either produces the whole table or one of these; there is no
/// partially loaded state.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The data file does not exist
    #[error("data file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The data file exists but could not be read
    #[error("failed to read data file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed delimited text
    #[error("malformed data in {} at row {row}: {message}", .path.display())]
    Malformed {
        path: PathBuf,
        row: u64,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A required column is absent from the header
    #[error("missing required column `{column}` in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A creation timestamp could not be parsed
    #[error("row {row}: cannot parse timestamp `{value}`")]
    InvalidTimestamp { row: u64, value: String },

    /// A sentiment label outside the three known values
    #[error("row {row}: invalid sentiment label `{value}`")]
    InvalidSentiment { row: u64, value: String },
}

/// Main error type for AirPulse operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset loading errors, fatal to a render pass
    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Network related errors (HTTP requests, etc.)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Chart rendering errors
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// CSV or image export errors
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl DashboardError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new export error with source
    pub fn export_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Export {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error with locale
    pub fn localization_with_locale(msg: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale: Some(locale.into()),
        }
    }

    /// Whether this error is an input-validation condition that a panel can
    /// recover from locally.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convert from reqwest::Error to DashboardError
impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map_or(0, |s| s.as_u16());
            Self::network_with_source(format!("HTTP error: {status_code}"), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to DashboardError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for DashboardError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}
