//! Stub transport shared by the dispatcher test suites.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use request_core::{
    ApiError, EndpointConfig, HttpRequest, HttpResponse, RequestDispatcher, Transport,
};

pub const BASE_URL: &str = "http://localhost:8000";

/// Replays one canned outcome for every request and records what was sent.
pub struct StubTransport {
    outcome: Result<HttpResponse, ApiError>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(HttpResponse {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: body.to_string(),
            }),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(ApiError::Transport(message.to_string())),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

pub fn dispatcher(transport: StubTransport) -> RequestDispatcher<StubTransport> {
    RequestDispatcher::new(EndpointConfig::new(BASE_URL, "api"), transport)
}
