//! The seam between request normalization and the network.
//!
//! # Design
//! `RequestDispatcher` only knows the `Transport` trait. `ReqwestTransport` is
//! the production implementation; tests substitute a stub that records the
//! `HttpRequest` and replays a canned `HttpResponse`. A transport reports a
//! response for every status code and fails only when no response arrived.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::body::{MultipartForm, MultipartPart};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Payload};

/// Executes one HTTP round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
///
/// No timeout is configured here; pass a pre-configured client to
/// `with_client` if one is needed.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            Some(Payload::Json(text)) => builder.body(text),
            Some(Payload::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
            None => builder,
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Options => Method::OPTIONS,
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<Form, ApiError> {
    let mut out = Form::new();
    for part in form.into_parts() {
        out = match part {
            MultipartPart::Text { name, value } => out.text(name, value),
            MultipartPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                let mut file = Part::bytes(bytes).file_name(filename);
                if let Some(content_type) = content_type {
                    file = file.mime_str(&content_type).map_err(transport_error)?;
                }
                out.part(name, file)
            }
        };
    }
    Ok(out)
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
