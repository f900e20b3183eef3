//! Error types for series-lake
//!
//! This module defines the error hierarchy for both pipeline stages.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! A missing time series is deliberately absent from this enum: it yields
//! zero records, not a failure.

use crate::types::ObjectLocation;
use thiserror::Error;

/// The main error type for series-lake
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Blob Store Errors
    // ============================================================================
    #[error("Failed to retrieve {location}: {message}")]
    Retrieval {
        location: ObjectLocation,
        message: String,
    },

    #[error("Failed to write {location}: {message}")]
    Write {
        location: ObjectLocation,
        message: String,
    },

    // ============================================================================
    // Payload / Event Errors
    // ============================================================================
    #[error("Malformed payload at {location}: {message}")]
    MalformedPayload {
        location: ObjectLocation,
        message: String,
    },

    #[error("Invalid arrival event: {message}")]
    InvalidEvent { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a retrieval error for a source object
    pub fn retrieval(location: ObjectLocation, message: impl Into<String>) -> Self {
        Self::Retrieval {
            location,
            message: message.into(),
        }
    }

    /// Create a write error for a destination object
    pub fn write(location: ObjectLocation, message: impl Into<String>) -> Self {
        Self::Write {
            location,
            message: message.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed(location: ObjectLocation, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            location,
            message: message.into(),
        }
    }

    /// Create an invalid event error
    pub fn invalid_event(message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Short, stable name of the error kind (used in reports and logs)
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config { .. } | Error::MissingConfigField { .. } | Error::YamlParse(_) => {
                "config"
            }
            Error::JsonParse(_) => "json",
            Error::Retrieval { .. } => "retrieval",
            Error::Write { .. } => "write",
            Error::MalformedPayload { .. } => "malformed_payload",
            Error::InvalidEvent { .. } => "invalid_event",
            Error::Http(_) | Error::HttpStatus { .. } | Error::InvalidUrl(_) => "http",
            Error::Io(_) => "io",
            Error::Other(_) => "other",
        }
    }

    /// Check if redelivering the same input could succeed
    ///
    /// Nothing in this crate retries; the classification is for the
    /// infrastructure that redelivers events.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Retrieval { .. } | Error::Write { .. } | Error::Http(_) => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for series-lake
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> ObjectLocation {
        ObjectLocation::new("landing", "raw/20240101_raw-data-api-response.json")
    }

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("destination_container");
        assert_eq!(
            err.to_string(),
            "Missing required config field: destination_container"
        );

        let err = Error::retrieval(loc(), "not found");
        assert_eq!(
            err.to_string(),
            "Failed to retrieve landing/raw/20240101_raw-data-api-response.json: not found"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::retrieval(loc(), "x").kind(), "retrieval");
        assert_eq!(Error::malformed(loc(), "x").kind(), "malformed_payload");
        assert_eq!(Error::write(loc(), "x").kind(), "write");
        assert_eq!(Error::config("x").kind(), "config");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::retrieval(loc(), "unreachable").is_retryable());
        assert!(Error::write(loc(), "rejected").is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());

        assert!(!Error::malformed(loc(), "eof").is_retryable());
        assert!(!Error::http_status(401, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::invalid_event("no Records").is_retryable());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
