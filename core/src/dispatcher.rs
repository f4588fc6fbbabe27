//! Request construction, dispatch, and response normalization.
//!
//! # Design
//! `RequestDispatcher` holds an immutable `EndpointConfig` and a `Transport`
//! and carries no other state between calls. A call is split into
//! `build_request` (produces an `HttpRequest`) and `parse_response` (consumes
//! an `HttpResponse`), both pure, with the transport round-trip in between.
//! `dispatch` glues the three together and folds every error into a
//! `ResponseResult::Failure`, so callers never see an `Err` or a panic.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::body::RequestBody;
use crate::config::{EndpointConfig, Environment};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Payload};
use crate::result::{Failure, ResponseResult};
use crate::transport::{ReqwestTransport, Transport};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Stateless dispatcher for the REST backend.
#[derive(Debug, Clone)]
pub struct RequestDispatcher<T = ReqwestTransport> {
    config: EndpointConfig,
    transport: T,
}

impl RequestDispatcher<ReqwestTransport> {
    pub fn for_environment(environment: Environment) -> Self {
        Self::new(EndpointConfig::for_environment(environment), ReqwestTransport::new())
    }
}

impl<T: Transport> RequestDispatcher<T> {
    pub fn new(config: EndpointConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `body` to `{base_url}/{api_prefix}/{path}` and normalize the
    /// outcome. `method` is matched case-insensitively.
    pub async fn dispatch<R: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: RequestBody,
        headers: &[(&str, &str)],
    ) -> ResponseResult<R> {
        let url = self.config.url_for(path);
        match self.execute(method, path, &body, headers).await {
            Ok(data) => ResponseResult::Success(data),
            Err(err) => {
                tracing::error!(
                    method,
                    url = %url,
                    status = err.status(),
                    error = ?err,
                    "request failed: {err}"
                );
                let message = err.to_string();
                ResponseResult::Failure(Failure::new(&message, self.config.base_url(), &url))
            }
        }
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: &RequestBody,
        headers: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let method: HttpMethod = method.parse()?;
        let request = self.build_request(method, path, body, headers)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            multipart = body.is_multipart(),
            "dispatching request"
        );
        let response = self.transport.send(request).await?;
        tracing::debug!(
            status = response.status,
            content_type = response.header("content-type"),
            "received response"
        );
        self.parse_response(response)
    }

    /// Build the outgoing request.
    ///
    /// JSON bodies get `Content-Type: application/json` merged with
    /// `headers` (caller entries win, names compared case-insensitively) and
    /// are omitted for GET and HEAD. Multipart bodies are passed through and
    /// `headers` are ignored so the transport can set the boundary.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: &RequestBody,
        headers: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let url = self.config.url_for(path);
        let request = match body {
            RequestBody::Multipart(form) => HttpRequest {
                method,
                url,
                headers: Vec::new(),
                body: Some(Payload::Multipart(form.clone())),
            },
            RequestBody::Json(map) => {
                let payload = if method.allows_body() {
                    let text = serde_json::to_string(map)
                        .map_err(|e| ApiError::Serialization(e.to_string()))?;
                    Some(Payload::Json(text))
                } else {
                    None
                };
                HttpRequest {
                    method,
                    url,
                    headers: merge_headers(headers),
                    body: payload,
                }
            }
        };
        Ok(request)
    }

    /// Parse the response body as JSON whatever the status, then map non-2xx
    /// statuses to `ApiError::Http` using the body's `message` field when it
    /// is a non-empty string.
    pub fn parse_response<R: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<R, ApiError> {
        let value: Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;

        if !response.is_success() {
            return Err(match value.get("message").and_then(Value::as_str) {
                Some(message) if !message.is_empty() => ApiError::Http {
                    status: response.status,
                    message: message.to_string(),
                },
                _ => ApiError::http_status(response.status),
            });
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn merge_headers(headers: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut merged = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
    for (name, value) in headers {
        match merged.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
            Some(entry) => *entry = (name.to_string(), value.to_string()),
            None => merged.push((name.to_string(), value.to_string())),
        }
    }
    merged
}
