//! The uniform outcome of a dispatched request.
//!
//! # Design
//! `ResponseResult<T>` is an explicit sum type instead of an object whose
//! shape depends on the server's payload. Serializing it still yields the
//! flat JSON shape callers of the REST backend expect:
//!
//! - success: `{"success": true, ...fields of T}`
//! - failure: `{"success": false, "message": .., "baseURL": .., "url": ..}`

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Message used when an error carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Message handed to callbacks when the error carried no text of its own.
pub const CALLBACK_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Details of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub message: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub url: String,
    /// Set when the underlying error had no text and `message` holds
    /// `FALLBACK_MESSAGE` instead.
    #[serde(skip)]
    fallback: bool,
}

impl Failure {
    /// An empty `message` is replaced by `FALLBACK_MESSAGE`.
    pub fn new(message: &str, base_url: &str, url: &str) -> Self {
        let fallback = message.is_empty();
        Self {
            message: if fallback { FALLBACK_MESSAGE } else { message }.to_string(),
            base_url: base_url.to_string(),
            url: url.to_string(),
            fallback,
        }
    }

    /// Whether the error carried no text of its own.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Exactly one of these is produced per dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseResult<T> {
    Success(T),
    Failure(Failure),
}

impl<T> ResponseResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseResult::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            ResponseResult::Success(data) => Some(data),
            ResponseResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ResponseResult::Success(_) => None,
            ResponseResult::Failure(failure) => Some(failure),
        }
    }

    /// The failure message, or `None` on success.
    pub fn message(&self) -> Option<&str> {
        self.failure().map(|failure| failure.message.as_str())
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            ResponseResult::Success(data) => Ok(data),
            ResponseResult::Failure(failure) => Err(failure),
        }
    }

    /// Adapter for callback-style callers: invokes `callback` exactly once
    /// with `(None, Some(data))` on success or `(Some(message), None)` on
    /// failure. A failure without error text reports
    /// `CALLBACK_FALLBACK_MESSAGE` to the callback.
    pub fn notify<F>(&self, callback: F)
    where
        F: FnOnce(Option<&str>, Option<&T>),
    {
        match self {
            ResponseResult::Success(data) => callback(None, Some(data)),
            ResponseResult::Failure(failure) if failure.is_fallback() => {
                callback(Some(CALLBACK_FALLBACK_MESSAGE), None)
            }
            ResponseResult::Failure(failure) => callback(Some(&failure.message), None),
        }
    }
}

impl<T: Serialize> Serialize for ResponseResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponseResult::Success(data) => {
                let value = serde_json::to_value(data).map_err(S::Error::custom)?;
                let mut merged = Map::new();
                merged.insert("success".to_string(), Value::Bool(true));
                match value {
                    // Payload fields are spread over `success`.
                    Value::Object(fields) => merged.extend(fields),
                    Value::Null => {}
                    other => {
                        merged.insert("data".to_string(), other);
                    }
                }
                let mut map = serializer.serialize_map(Some(merged.len()))?;
                for (key, value) in &merged {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ResponseResult::Failure(failure) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("message", &failure.message)?;
                map.serialize_entry("baseURL", &failure.base_url)?;
                map.serialize_entry("url", &failure.url)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn failure(message: &str) -> ResponseResult<Value> {
        ResponseResult::Failure(Failure::new(
            message,
            "http://localhost:8000",
            "http://localhost:8000/api/users",
        ))
    }

    #[test]
    fn success_spreads_object_fields() {
        let result = ResponseResult::Success(json!({"id": 1, "name": "Ann"}));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "id": 1, "name": "Ann"})
        );
    }

    #[test]
    fn payload_success_field_wins() {
        let result = ResponseResult::Success(json!({"success": "partial"}));
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"success": "partial"}));
    }

    #[test]
    fn non_object_payload_goes_under_data() {
        let result = ResponseResult::Success(json!([1, 2]));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": [1, 2]})
        );
    }

    #[test]
    fn failure_uses_base_url_key() {
        assert_eq!(
            serde_json::to_value(failure("name taken")).unwrap(),
            json!({
                "success": false,
                "message": "name taken",
                "baseURL": "http://localhost:8000",
                "url": "http://localhost:8000/api/users",
            })
        );
    }

    #[test]
    fn notify_passes_data_on_success() {
        let result = ResponseResult::Success(json!({"id": 1}));
        let mut calls = Vec::new();
        result.notify(|err, data| calls.push((err.map(str::to_string), data.cloned())));
        assert_eq!(calls, vec![(None, Some(json!({"id": 1})))]);
    }

    #[test]
    fn notify_passes_message_on_failure() {
        let mut calls = Vec::new();
        failure("boom").notify(|err, data| calls.push((err.map(str::to_string), data.cloned())));
        assert_eq!(calls, vec![(Some("boom".to_string()), None)]);
    }

    #[test]
    fn empty_message_uses_distinct_fallbacks() {
        let result = failure("");
        assert_eq!(result.message(), Some(FALLBACK_MESSAGE));
        let mut seen = None;
        result.notify(|err, _| seen = err.map(str::to_string));
        assert_eq!(seen.as_deref(), Some(CALLBACK_FALLBACK_MESSAGE));
    }

    #[test]
    fn fallback_flag_is_not_serialized() {
        assert_eq!(
            serde_json::to_value(failure("")).unwrap(),
            json!({
                "success": false,
                "message": "An error occurred",
                "baseURL": "http://localhost:8000",
                "url": "http://localhost:8000/api/users",
            })
        );
    }

    #[test]
    fn message_is_none_on_success() {
        assert_eq!(ResponseResult::Success(json!({})).message(), None);
        assert_eq!(failure("boom").message(), Some("boom"));
    }

    #[test]
    fn into_result_maps_variants() {
        assert_eq!(ResponseResult::Success(1).into_result(), Ok(1));
        assert!(failure("x").into_result().is_err());
        assert!(failure("x").failure().is_some());
        assert!(failure("x").success().is_none());
    }
}
