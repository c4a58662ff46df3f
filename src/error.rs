//! Error types for the document submission client.

use thiserror::Error;

/// The main error type for all submission operations.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The client or limiter was configured with invalid values
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Rate limit exceeded, no request was sent
    #[error("Rate limit exceeded, retry after {retry_after_ms:?}ms")]
    RateLimitExceeded {
        /// Suggested wait time in milliseconds before retrying
        retry_after_ms: Option<u64>,
    },

    /// The document could not be serialized
    #[error("Failed to encode document: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The response body could not be parsed
    #[error("Failed to decode response: {source}. Body: {body}")]
    Decoding {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The service answered with a non-success status
    #[error("Document rejected: HTTP {status}: {body}")]
    RemoteRejected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The authorization credential could not be obtained or attached
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl SubmitError {
    /// Check if this error is a local rate limit denial.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Check if retrying the same submission later could succeed.
    ///
    /// Nothing in this crate retries automatically; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded { .. } | Self::Transport(_) => true,
            Self::RemoteRejected { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of a remote rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_display() {
        let error = SubmitError::RateLimitExceeded {
            retry_after_ms: Some(250),
        };
        assert_eq!(error.to_string(), "Rate limit exceeded, retry after Some(250)ms");
        assert!(error.is_rate_limited());
        assert!(error.is_retryable());
    }

    #[test]
    fn test_remote_rejected_carries_status_and_body() {
        let error = SubmitError::RemoteRejected {
            status: 400,
            body: "{\"error\":\"bad signature\"}".to_string(),
        };
        assert_eq!(error.status(), Some(400));
        assert!(!error.is_retryable());
        assert!(error.to_string().contains("bad signature"));

        let busy = SubmitError::RemoteRejected {
            status: 503,
            body: String::new(),
        };
        assert!(busy.is_retryable());
    }

    #[test]
    fn test_decoding_keeps_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = SubmitError::Decoding {
            source,
            body: "not json".to_string(),
        };
        assert!(error.to_string().ends_with("Body: not json"));
        assert_eq!(error.status(), None);
        assert!(!error.is_retryable());
    }
}
