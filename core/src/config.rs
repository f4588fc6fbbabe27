//! Endpoint configuration for the REST backend.
//!
//! # Design
//! The configuration is chosen once at process start (development or
//! production origin) and handed to `RequestDispatcher` by value. Nothing
//! mutates it afterwards, so concurrent dispatches read it without locking.

use serde::{Deserialize, Serialize};

pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:8000";
pub const PRODUCTION_BASE_URL: &str = "https://slbcph.site";
pub const API_PREFIX: &str = "api";

/// Deployment environment selecting one of the two fixed origins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn from_development_flag(development: bool) -> Self {
        if development {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

/// Base origin plus API path prefix. Every request URL is
/// `{base_url}/{api_prefix}/{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    base_url: String,
    api_prefix: String,
}

impl EndpointConfig {
    pub fn new(base_url: &str, api_prefix: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_prefix: api_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        let base_url = match environment {
            Environment::Development => DEVELOPMENT_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        };
        Self::new(base_url, API_PREFIX)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// The path is appended verbatim; a malformed result surfaces later as a
    /// transport failure.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.base_url, self.api_prefix)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}
