//! Outcome vocabulary shared by every component of the engine.
//!
//! An [`ApiResult`] is the terminal value of one request cycle: a success
//! carrying an optional payload (empty 2xx bodies such as 204 have none), or
//! a failure carrying an optional structured [`ApiError`] plus a
//! [`FailureReason`] classification. The two failure fields are mutually
//! informative, not mutually exclusive: an API-reported error arrives with a
//! generic reason, a transport failure arrives with no `ApiError` at all.

use serde::Deserialize;

/// Structured error reported by the API in a non-2xx response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Mirrors the HTTP status code of the response.
    pub code: u16,
    /// Request trace id (`request_id` on the wire).
    pub id: String,
    /// Machine-readable error name (`id` on the wire).
    pub name: String,
    /// Human-readable description (`message` on the wire).
    pub description: String,
}

/// Wire shape of an API error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    request_id: String,
    id: String,
    message: String,
}

impl ApiError {
    /// Parse an error body, binding it to the response status.
    ///
    /// Returns `None` when the body does not match the expected shape; the
    /// caller then reports the failure without a structured error.
    #[must_use]
    pub fn from_body(status: u16, body: &[u8]) -> Option<Self> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        Some(Self {
            code: status,
            id: parsed.request_id,
            name: parsed.id,
            description: parsed.message,
        })
    }
}

/// Classification of a failure not explained by a structured API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The transport reported no connectivity.
    NotConnectedToInternet,
    /// The handle was cancelled.
    Cancelled,
    /// Anything else: decode failures, unclassified transport errors,
    /// non-2xx responses without an error body.
    Other,
}

/// Two-case outcome of one logical operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// 2xx response; payload absent for empty bodies.
    Success(Option<T>),
    /// Everything else.
    Failure(Option<ApiError>, FailureReason),
}

impl<T> ApiResult<T> {
    /// Returns true for the success case.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(Some(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the structured API error, if the failure carried one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Failure(Some(error), _) => Some(error),
            _ => None,
        }
    }

    /// Returns the failure classification, if this is a failure.
    #[must_use]
    pub const fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::Failure(_, reason) => Some(*reason),
            Self::Success(_) => None,
        }
    }
}
