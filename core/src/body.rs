//! Request bodies accepted by `RequestDispatcher::dispatch`.
//!
//! # Design
//! The body representation is chosen by the caller through the
//! `RequestBody` variant rather than inspected at runtime: a JSON object is
//! serialized and tagged with `application/json`, while a `MultipartForm` is
//! handed to the transport untouched so it can pick the boundary itself.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Body of an outgoing request. Defaults to an empty JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Map<String, Value>),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serialize any value whose JSON form is an object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))? {
            Value::Object(map) => Ok(RequestBody::Json(map)),
            other => Err(ApiError::Serialization(format!(
                "request body must be a JSON object, got {other}"
            ))),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        RequestBody::Json(Map::new())
    }
}

impl From<Map<String, Value>> for RequestBody {
    fn from(map: Map<String, Value>) -> Self {
        RequestBody::Json(map)
    }
}

impl From<MultipartForm> for RequestBody {
    fn from(form: MultipartForm) -> Self {
        RequestBody::Multipart(form)
    }
}

/// A single field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl MultipartPart {
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Pre-built multipart payload, sent verbatim by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn file(
        mut self,
        name: &str,
        filename: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.to_string(),
            filename: filename.to_string(),
            content_type: content_type.map(str::to_string),
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<MultipartPart> {
        self.parts
    }
}
