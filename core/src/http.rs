//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `RequestDispatcher::build_request` produces an `HttpRequest` and
//! `RequestDispatcher::parse_response` consumes an `HttpResponse` without
//! touching the network; a `Transport` performs the actual round-trip. This
//! keeps request construction and response normalization deterministic and
//! testable against a stub transport.

use std::fmt;
use std::str::FromStr;

use crate::body::MultipartForm;
use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// GET and HEAD never carry a payload.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    /// Case-insensitive: `"get"`, `"Get"` and `"GET"` are the same verb.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(ApiError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Outgoing request payload, already encoded for the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Serialized JSON text.
    Json(String),
    /// Form parts; the transport picks the boundary and content type.
    Multipart(MultipartForm),
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Payload>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing_ignores_case() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("pAtCh".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "brew".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedMethod(ref m) if m == "brew"));
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn only_get_and_head_forbid_body() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Head.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Delete.allows_body());
    }

    #[test]
    fn success_is_2xx_only() {
        let response = |status| HttpResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(404).is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://x/api/a".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn response_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: "ok".to_string(),
        };
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("etag"), None);
    }
}
