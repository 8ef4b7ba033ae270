//! Centralized error handling and classification

use crate::api::error::ApiError;
use crate::consts::cli_consts::rate_limiting;
use crate::logging::LogLevel;
use std::cmp::min;
use std::time::Duration;

/// How a failed request should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The endpoint is not available for this deployment (404).
    NotSupported,
    /// The server asked us to back off (429/503); retry after the delay.
    Throttled(Duration),
    /// Anything else. Surfaced to the user, never retried.
    Generic,
}

/// Centralized error handler for API operations
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    default_retry_delay: Duration,
}

impl ErrorHandler {
    pub fn new() -> Self {
        Self {
            default_retry_delay: rate_limiting::default_retry_delay(),
        }
    }

    /// Classify an error into the handling branch it belongs to
    pub fn classify(&self, error: &ApiError) -> ErrorClass {
        match error.status() {
            Some(404) => ErrorClass::NotSupported,
            Some(429) | Some(503) => {
                let delay = error
                    .retry_after()
                    .unwrap_or(self.default_retry_delay);
                ErrorClass::Throttled(min(delay, rate_limiting::max_retry_delay()))
            }
            _ => ErrorClass::Generic,
        }
    }

    /// Classify error and determine appropriate log level
    pub fn log_level(&self, error: &ApiError) -> LogLevel {
        match error {
            // Rate limiting - low priority
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,

            // Missing endpoint - expected on some deployments
            ApiError::Http { status, .. } if *status == 404 => LogLevel::Debug,

            // Server errors - temporary issues
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            ApiError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ApiError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Malformed payloads point at an API mismatch
            ApiError::Json(_) => LogLevel::Error,

            // Network issues - usually temporary
            ApiError::Reqwest(_) => LogLevel::Warn,

            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_not_found_is_not_supported() {
        let handler = ErrorHandler::new();
        assert_eq!(
            handler.classify(&http(404, "subscription not supported")),
            ErrorClass::NotSupported
        );
    }

    #[test]
    fn test_throttling_uses_server_delay() {
        let handler = ErrorHandler::new();
        let payload = r#"{"error": {"retry-after": 7}}"#;
        assert_eq!(
            handler.classify(&http(429, payload)),
            ErrorClass::Throttled(Duration::from_secs(7))
        );
        assert_eq!(
            handler.classify(&http(503, payload)),
            ErrorClass::Throttled(Duration::from_secs(7))
        );
    }

    #[test]
    fn test_throttling_without_delay_falls_back_to_default() {
        let handler = ErrorHandler::new();
        assert_eq!(
            handler.classify(&http(429, "slow down")),
            ErrorClass::Throttled(rate_limiting::default_retry_delay())
        );
    }

    #[test]
    fn test_huge_server_delay_is_capped() {
        let handler = ErrorHandler::new();
        let payload = r#"{"error": {"retry-after": 86400}}"#;
        assert_eq!(
            handler.classify(&http(429, payload)),
            ErrorClass::Throttled(rate_limiting::max_retry_delay())
        );
    }

    #[test]
    fn test_everything_else_is_generic() {
        let handler = ErrorHandler::new();
        for status in [400, 401, 403, 500, 502] {
            assert_eq!(handler.classify(&http(status, "")), ErrorClass::Generic);
        }
        let json_error = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        assert_eq!(
            handler.classify(&ApiError::Json(json_error)),
            ErrorClass::Generic
        );
    }

    #[test]
    fn test_log_levels() {
        let handler = ErrorHandler::new();
        assert_eq!(handler.log_level(&http(429, "")), LogLevel::Debug);
        assert_eq!(handler.log_level(&http(503, "")), LogLevel::Warn);
        assert_eq!(handler.log_level(&http(401, "")), LogLevel::Error);
        assert_eq!(handler.log_level(&http(418, "")), LogLevel::Warn);
    }
}
