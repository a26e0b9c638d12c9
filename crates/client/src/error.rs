//! Error taxonomy for remote API calls.
//!
//! Client-side form validation never produces an [`ApiError`]: it is caught
//! before any request is built and surfaces as a validation report in the
//! form layer instead.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the Arenda backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with a structured error payload.
    #[error("HTTP {status}: {}", payload.summary())]
    Status { status: u16, payload: ErrorPayload },

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Structured error body returned by the backend.
///
/// Either a single `message`, or per-field validation messages under
/// `errors`, or both.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Top-level error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Validation messages keyed by field name.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorPayload {
    /// Build a payload carrying only a message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }

    /// One-line summary for logs and `Display`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(message) = &self.message
            && !message.is_empty()
        {
            parts.push(message.clone());
        }

        for (field, messages) in &self.errors {
            parts.push(format!("{field}: {}", messages.join(", ")));
        }

        if parts.is_empty() {
            return "(no error details provided)".to_string();
        }

        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("/products/123".to_string());
        assert_eq!(err.to_string(), "Not found: /products/123");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ApiError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_payload_summary_message_only() {
        let payload = ErrorPayload::from_message("category not found");
        assert_eq!(payload.summary(), "category not found");
    }

    #[test]
    fn test_payload_summary_field_errors() {
        let payload: ErrorPayload = serde_json::from_str(
            r#"{"errors": {"name": ["required"], "price_rub": ["must be a number"]}}"#,
        )
        .expect("deserialize");
        let err = ApiError::Status {
            status: 422,
            payload,
        };
        assert_eq!(
            err.to_string(),
            "HTTP 422: name: required; price_rub: must be a number"
        );
    }

    #[test]
    fn test_payload_summary_empty() {
        let payload = ErrorPayload::default();
        assert_eq!(payload.summary(), "(no error details provided)");
    }
}
