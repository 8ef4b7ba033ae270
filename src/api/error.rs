//! Error handling for the api module

use crate::consts::cli_consts::rate_limiting::MAX_RETRY_AFTER_SECS;
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            ApiError::Json(_) => None,
        }
    }

    /// Server-provided retry delay carried in a throttling response.
    ///
    /// The message payload is expected to be JSON of the form
    /// `{"error": {"retry-after": <seconds>}}`; the value may be a number or a
    /// numeric string. Values past the maximum retry delay are clamped to it.
    pub fn retry_after(&self) -> Option<Duration> {
        let ApiError::Http { message, .. } = self else {
            return None;
        };
        let payload: Value = serde_json::from_str(message).ok()?;
        let seconds = match payload.get("error")?.get("retry-after")? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        Some(Duration::from_secs_f64(seconds.min(MAX_RETRY_AFTER_SECS as f64)))
    }
}

/// An API failure as kept in view state and shown by the error banner.
#[derive(Debug, Clone)]
pub struct ReportedError {
    error: Arc<ApiError>,
    user_message: Option<String>,
}

impl ReportedError {
    pub fn new(error: ApiError) -> Self {
        Self {
            error: Arc::new(error),
            user_message: None,
        }
    }

    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    pub fn error(&self) -> &ApiError {
        &self.error
    }

    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.error.status()
    }
}

impl Display for ReportedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.user_message {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "{}", self.error),
        }
    }
}
