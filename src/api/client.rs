//! Management API Client
//!
//! A reqwest-backed implementation of [`ApiCall`] that attaches the viewer's
//! access token to every request.

use crate::api::error::ApiError;
use crate::api::{ApiCall, ApiRequest, HttpMethod, ResultType};
use crate::consts::cli_consts::http;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde_json::Value;

// User-Agent string with console version
const USER_AGENT: &str = concat!("tre-console/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            access_token,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn build_request(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.build_url(&request.endpoint.to_string());
        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .header("User-Agent", USER_AGENT);

        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(headers) = &request.headers {
            for (name, value) in headers {
                builder = builder.header(name, value);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode_response(response: Response, result_type: ResultType) -> Result<Value, ApiError> {
        match result_type {
            ResultType::Json => {
                let bytes = response.bytes().await?;
                if bytes.is_empty() {
                    return Ok(Value::Null);
                }
                Ok(serde_json::from_slice(&bytes)?)
            }
            ResultType::Text => Ok(Value::String(response.text().await?)),
            ResultType::None => Ok(Value::Null),
        }
    }
}

#[async_trait::async_trait]
impl ApiCall for ApiClient {
    async fn call(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let response = self.build_request(&request).send().await?;
        let response = Self::handle_response_status(response).await?;
        Self::decode_response(response, request.result_type).await
    }
}
