//! Error types for request building, transport, and response parsing.
//!
//! # Design
//! `ApiError` is only used inside the crate's pipeline and by the pure
//! `build_request` / `parse_response` helpers. `RequestDispatcher::dispatch`
//! never returns it: every variant is folded into a `Failure` whose message
//! is this error's `Display` text. For that reason the transport, HTTP and
//! decode variants display the bare message without any prefix.

use thiserror::Error;

/// Errors raised while building, sending, or parsing a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The method string is not one of the supported verbs.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (DNS, connect, TLS, bad URL).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `message` is the server's
    /// own `message` field when present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body is not valid JSON or does not match the expected
    /// payload type.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    pub fn http_status(status: u16) -> Self {
        ApiError::Http {
            status,
            message: format!("HTTP error! Status: {status}"),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
