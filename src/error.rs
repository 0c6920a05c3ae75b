//! Error types for the Bookdesk list client

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx answer from a collection or mutation endpoint
    #[error("{message}")]
    Endpoint { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error body some endpoints send alongside a failing status
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ClientError {
    /// Build an endpoint error from a failing status and its raw body.
    ///
    /// Uses the body's `message` when present, otherwise
    /// `API Error: <status> <reason>`.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "API Error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string()
            });

        ClientError::Endpoint {
            status: status.as_u16(),
            message,
        }
    }

    /// Map a reqwest failure, separating timeouts from other transport errors
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }

    /// Text shown to the user in a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Endpoint { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_body() {
        let err = ClientError::from_status(StatusCode::BAD_REQUEST, br#"{"message":"Invalid status"}"#);
        assert_eq!(err.user_message(), "Invalid status");
        assert!(matches!(err, ClientError::Endpoint { status: 400, .. }));
    }

    #[test]
    fn test_generic_message() {
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
        assert_eq!(err.user_message(), "API Error: 500 Internal Server Error");

        let err = ClientError::from_status(StatusCode::NOT_FOUND, br#"{"error":"nope"}"#);
        assert_eq!(err.user_message(), "API Error: 404 Not Found");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, br#"{"message":"  "}"#);
        assert_eq!(err.user_message(), "API Error: 502 Bad Gateway");
    }
}
