use crate::api::error::ApiError;
use serde_json::Value;
use std::collections::HashMap;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;
pub mod error_handler;

#[cfg(test)]
use mockall::automock;

/// Management API endpoints used by the console.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ApiEndpoint {
    #[strum(serialize = "api/workspaces")]
    Workspaces,
    #[strum(serialize = "api/costs")]
    Costs,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// Shape the caller expects back from the server.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultType {
    /// Parse the body as JSON.
    Json,
    /// Return the body as a JSON string value.
    Text,
    /// Ignore the body.
    None,
}

/// A single call against the management API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: ApiEndpoint,
    pub method: HttpMethod,
    pub body: Option<Value>,
    pub headers: Option<HashMap<String, String>>,
    pub result_type: ResultType,
}

impl ApiRequest {
    /// A body-less GET expecting JSON back.
    pub fn get(endpoint: ApiEndpoint) -> Self {
        Self {
            endpoint,
            method: HttpMethod::Get,
            body: None,
            headers: None,
            result_type: ResultType::Json,
        }
    }

    #[cfg(test)]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[cfg(test)]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// Authenticated access to the management API.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ApiCall: Send + Sync {
    /// Performs the request and returns the parsed result.
    async fn call(&self, request: ApiRequest) -> Result<Value, ApiError>;
}
