//! Request dispatcher for the slbcph REST API.
//!
//! # Overview
//! Builds HTTP requests from a method, path, body and headers, sends them
//! through a `Transport`, parses the JSON response and returns a uniform
//! `ResponseResult`. Transport faults, non-2xx statuses and malformed JSON
//! all come back as `ResponseResult::Failure`; nothing is thrown past
//! `RequestDispatcher::dispatch`.
//!
//! # Design
//! - `EndpointConfig` is built once at startup and owned by the dispatcher.
//! - Each call is split into `build_request` and `parse_response`, both pure,
//!   so the I/O boundary stays explicit and stub transports can drive tests.
//! - Request bodies are a tagged `RequestBody` (JSON object or multipart
//!   form) chosen by the caller.
//! - No retries, caching, cancellation or timeouts are applied here.

pub mod body;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod result;
pub mod transport;

pub use body::{MultipartForm, MultipartPart, RequestBody};
pub use config::{EndpointConfig, Environment};
pub use dispatcher::RequestDispatcher;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Payload};
pub use result::{Failure, ResponseResult};
pub use transport::{ReqwestTransport, Transport};
