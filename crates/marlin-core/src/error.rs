//! Error types for request construction and configuration.
//!
//! These errors surface synchronously, before any network activity. Failures
//! observed after a request has been issued travel through
//! [`ApiResult`](crate::result::ApiResult) instead.

use thiserror::Error;

/// Main error type for synchronous marlin operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request payload could not be serialized to JSON
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Request was assembled from incompatible inputs
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint could not be rendered into a valid URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid resource identifier
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}

/// Specialized result type for marlin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidId(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidPayload("unsupported value".to_string());
        assert_eq!(err.to_string(), "Invalid payload: unsupported value");

        let err = Error::InvalidRequest("payload and parameters".to_string());
        assert_eq!(err.to_string(), "Invalid request: payload and parameters");
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let marlin_err: Error = err.into();
        assert!(matches!(marlin_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let marlin_err: Error = err.into();
        assert!(matches!(marlin_err, Error::InvalidPayload(_)));
    }

    #[test]
    fn test_from_uuid_error() {
        let err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let marlin_err: Error = err.into();
        assert!(matches!(marlin_err, Error::InvalidId(_)));
    }

    #[test]
    fn test_error_clone_and_eq() {
        let err = Error::ConfigError("missing token".to_string());
        assert_eq!(err.clone(), err);
    }
}
