//! Response decoding: status classification, key-path extraction, and the
//! typed decode layer.
//!
//! Decoding never panics: a body that fails to parse, a key-path that misses,
//! or a model that cannot be constructed all collapse into
//! `Failure(None, Other)`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::result::{ApiError, ApiResult, FailureReason};
use crate::transport::RawResponse;

/// Capability of being constructed from a decoded JSON value.
///
/// Blanket-implemented for every `Deserialize` type, so models only derive
/// `Deserialize`; `Vec<M>` is the ordered-sequence target and decodes
/// all-or-nothing — partial sequences are never produced.
pub trait FromJson: Sized {
    /// Attempt construction; `None` when the value does not fit.
    fn from_json(value: Value) -> Option<Self>;
}

impl<T> FromJson for T
where
    T: DeserializeOwned,
{
    fn from_json(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Descend into `value` one dot-delimited segment at a time.
///
/// Returns `None` when a segment is missing or an intermediate value is not
/// an object.
pub(crate) fn value_at_key_path(value: Value, key_path: &str) -> Option<Value> {
    let mut current = value;
    for segment in key_path.split('.') {
        match current {
            Value::Object(mut map) => current = map.remove(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

/// Decode one raw response into a typed result.
///
/// 2xx statuses are success regardless of body presence; an empty body yields
/// `Success(None)`. Non-2xx statuses are failure, with the structured
/// [`ApiError`] populated only when the body parses into the error shape.
#[must_use]
pub fn decode_response<T: FromJson>(
    response: &RawResponse,
    key_path: Option<&str>,
) -> ApiResult<T> {
    let status = response.status();

    if !status.is_success() {
        let error = response
            .body()
            .and_then(|body| ApiError::from_body(status.as_u16(), body));
        return ApiResult::Failure(error, FailureReason::Other);
    }

    let Some(body) = response.body() else {
        return ApiResult::Success(None);
    };

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            debug!(status = status.as_u16(), %err, "response body is not valid JSON");
            return ApiResult::Failure(None, FailureReason::Other);
        }
    };

    let value = match key_path {
        Some(path) => match value_at_key_path(value, path) {
            Some(value) => value,
            None => {
                debug!(key_path = path, "key path not present in response");
                return ApiResult::Failure(None, FailureReason::Other);
            }
        },
        None => value,
    };

    match T::from_json(value) {
        Some(model) => ApiResult::Success(Some(model)),
        None => ApiResult::Failure(None, FailureReason::Other),
    }
}
