use std::fmt;
use thiserror::Error;

/// The base error type shared by all token bridge crates.
///
/// Each crate keeps its own error enum and implements `From<SpecificError>`
/// for `BridgeError` so that HTTP handlers can answer with one shape.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// A required integration is not configured for this process
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BridgeError {
    fn status_code(&self) -> u16 {
        match self {
            BridgeError::HttpError(_) => 502,
            BridgeError::ParseError(_) => 400,
            BridgeError::ConfigError(_) => 500,
            BridgeError::ValidationError(_) => 400,
            BridgeError::ExternalServiceError { .. } => 502,
            BridgeError::NotFoundError(_) => 404,
            BridgeError::ServiceUnavailable(_) => 503,
            BridgeError::InternalError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BridgeError {
    BridgeError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BridgeError {
    BridgeError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> BridgeError {
    BridgeError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BridgeError {
    BridgeError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BridgeError {
    BridgeError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(validation_error("too many").status_code(), 400);
        assert_eq!(not_found("empty response").status_code(), 404);
        assert_eq!(config_error("no key").status_code(), 500);
        assert_eq!(internal_error("quota exceeded").status_code(), 500);
        assert_eq!(external_service_error("Firebase", "down").status_code(), 502);
        assert_eq!(
            BridgeError::ServiceUnavailable("firebase".to_string()).status_code(),
            503
        );
    }

    #[test]
    fn test_external_service_error_message() {
        let err = external_service_error("Firebase", "connection reset");
        assert_eq!(
            err.to_string(),
            "External service error: Firebase - connection reset"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BridgeError = parse_err.into();
        assert!(matches!(err, BridgeError::ParseError(_)));
    }
}
