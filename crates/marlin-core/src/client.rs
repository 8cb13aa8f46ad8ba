//! The caller-facing engine: URL construction, request construction, and
//! task creation.
//!
//! An [`Api`] owns the immutable configuration and the injected transport;
//! everything else is per-operation state carried by the
//! [`Handle`](crate::handle::Handle) it hands out.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::config::ApiConfig;
use crate::decode::FromJson;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::handle::{Handle, PollHandler};
use crate::query::Page;
use crate::result::ApiResult;
use crate::transport::{HttpTransport, RawResponse, Transport};

/// Transport-ready request.
///
/// Immutable once built. `Clone` so the polling engine can re-issue it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers. `Authorization` is always present.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized JSON body, if a payload was supplied.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Entry point for issuing requests against the versioned API.
#[derive(Clone)]
pub struct Api {
    config: Arc<ApiConfig>,
    transport: Arc<dyn Transport>,
}

impl Api {
    /// Create an API client backed by the production HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create an API client with an injected transport.
    #[must_use]
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Build the fully-qualified URL for an endpoint.
    ///
    /// Pagination keys come first (`page`, `per_page`), then caller
    /// parameters in the order supplied. No parameters, no query string.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint path cannot be joined onto the base.
    pub fn url_to(
        &self,
        endpoint: &Endpoint,
        page: Option<Page>,
        parameters: &[(&str, String)],
    ) -> Result<Url> {
        let mut url = self.config.base().join(&endpoint.path())?;

        if page.is_some() || !parameters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            if let Some(page) = page {
                for (key, value) in page.to_pairs() {
                    pairs.append_pair(key, &value);
                }
            }
            for (key, value) in parameters {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Build a transport-ready request for an endpoint.
    ///
    /// A payload is serialized to a JSON body with
    /// `Content-Type: application/json`; parameters are folded into the URL
    /// query string. Payload and parameters are mutually exclusive per call.
    ///
    /// # Errors
    ///
    /// Returns an error if both a payload and parameters are supplied, or if
    /// the payload cannot be serialized. These are programmer errors and
    /// surface here, before any network activity.
    pub fn request_to<P>(
        &self,
        endpoint: &Endpoint,
        method: Method,
        payload: Option<&P>,
        page: Option<Page>,
        parameters: &[(&str, String)],
    ) -> Result<ApiRequest>
    where
        P: Serialize + ?Sized,
    {
        if payload.is_some() && !parameters.is_empty() {
            return Err(Error::InvalidRequest(
                "payload and query parameters are mutually exclusive".to_string(),
            ));
        }

        let url = self.url_to(endpoint, page, parameters)?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&self.config.bearer_header())
            .map_err(|_| Error::ConfigError("token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let body = match payload {
            Some(payload) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(serde_json::to_vec(payload)?)
            }
            None => None,
        };

        Ok(ApiRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Start describing a task for an already-built request.
    #[must_use]
    pub fn task<T>(&self, request: ApiRequest) -> TaskBuilder<'_, T> {
        TaskBuilder {
            api: self,
            request,
            key_path: None,
            poll_handler: None,
        }
    }
}

/// Builder for a [`Handle`]: key-path and polling predicate are optional.
pub struct TaskBuilder<'a, T> {
    api: &'a Api,
    request: ApiRequest,
    key_path: Option<String>,
    poll_handler: Option<PollHandler<T>>,
}

impl<T> TaskBuilder<'_, T> {
    /// Extract the named value from the response before typed decoding.
    #[must_use]
    pub fn key_path(mut self, path: impl Into<String>) -> Self {
        self.key_path = Some(path.into());
        self
    }

    /// Re-issue the request after each response for which the predicate
    /// returns `true`.
    #[must_use]
    pub fn poll_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ApiResult<T>, Option<&RawResponse>) -> bool + Send + Sync + 'static,
    {
        self.poll_handler = Some(Arc::new(handler));
        self
    }

    /// Build the handle in its suspended state. Nothing happens until
    /// [`Handle::resume`] is called.
    #[must_use]
    pub fn build(self) -> Handle<T>
    where
        T: FromJson + Clone + Send + Sync + 'static,
    {
        Handle::new(
            self.request,
            Arc::clone(&self.api.transport),
            self.key_path,
            self.poll_handler,
        )
    }
}
