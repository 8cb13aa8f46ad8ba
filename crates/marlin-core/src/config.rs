//! Configuration for the API engine.
//!
//! [`ApiConfig`] is the only state shared across handles: the API version,
//! the bearer token, and an optional base-URL override. It is immutable after
//! construction.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use crate::error::{Error, Result};

/// Versioned API prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiVersion {
    /// The v2 REST API.
    V2,
}

impl ApiVersion {
    /// Returns the fully-qualified base URL for this version.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::V2 => "https://api.digitalocean.com/v2/",
        }
    }
}

#[derive(Debug, Validate)]
struct ConfigInput {
    #[validate(url)]
    base_url: String,
    #[validate(length(min = 1))]
    token: String,
}

/// Immutable configuration for an [`Api`](crate::client::Api) instance.
///
/// The bearer token is held as a [`SecretString`] so it never leaks through
/// `Debug` output or accidental serialization.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    version: ApiVersion,
    token: SecretString,
    base: Url,
}

impl ApiConfig {
    /// Create a configuration for the given API version and bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(version: ApiVersion, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let input = ConfigInput {
            base_url: version.base_url().to_string(),
            token: token.clone(),
        };
        input
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        let base = Url::parse(version.base_url())?;

        Ok(Self {
            version,
            token: SecretString::from(token),
            base,
        })
    }

    /// Override the base URL, keeping the version semantics.
    ///
    /// Intended for integration tests and private deployments. The override
    /// replaces the version prefix wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let mut base = Url::parse(base_url.as_ref())?;
        // A base without a trailing slash would swallow its last path segment
        // when joined with an endpoint path.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        self.base = base;
        Ok(self)
    }

    /// Returns the API version.
    #[must_use]
    pub const fn version(&self) -> ApiVersion {
        self.version
    }

    /// Returns the effective base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Renders the `Authorization` header value.
    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_base_url() {
        assert_eq!(ApiVersion::V2.base_url(), "https://api.digitalocean.com/v2/");
    }

    #[test]
    fn test_config_new() {
        let config = ApiConfig::new(ApiVersion::V2, "a1a2a3a4a5a6").unwrap();
        assert_eq!(config.version(), ApiVersion::V2);
        assert_eq!(config.base().as_str(), ApiVersion::V2.base_url());
        assert_eq!(config.bearer_header(), "Bearer a1a2a3a4a5a6");
    }

    #[test]
    fn test_config_rejects_empty_token() {
        let result = ApiConfig::new(ApiVersion::V2, "");
        assert!(matches!(result.unwrap_err(), Error::ConfigError(_)));
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = ApiConfig::new(ApiVersion::V2, "super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_config_base_override() {
        let config = ApiConfig::new(ApiVersion::V2, "token")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080/v2")
            .unwrap();
        assert_eq!(config.base().as_str(), "http://127.0.0.1:8080/v2/");
    }

    #[test]
    fn test_config_base_override_invalid() {
        let result = ApiConfig::new(ApiVersion::V2, "token")
            .unwrap()
            .with_base_url("not a url");
        assert!(matches!(result.unwrap_err(), Error::InvalidEndpoint(_)));
    }
}
