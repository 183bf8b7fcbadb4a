use std::time::Duration;

use thiserror::Error;

use super::retry::Retryable;

/// Failure of a single logical upstream call, after retries were exhausted or skipped.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} timed out after {}ms", after.as_millis())]
    Timeout { url: String, after: Duration },
    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid upstream URL: {0}")]
    Url(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl Retryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Status { status, .. } => matches!(status, 500 | 502 | 503),
            Self::Decode { .. } | Self::Url(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            url: "http://upstream.test/v1/posts".to_string(),
        }
    }

    #[test]
    fn only_selected_server_errors_are_retryable() {
        assert!(status(500).is_retryable());
        assert!(status(502).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(504).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!status(400).is_retryable());
    }

    #[test]
    fn timeouts_are_retryable_and_decode_failures_are_not() {
        let timeout = ApiError::Timeout {
            url: "http://upstream.test/health".to_string(),
            after: Duration::from_secs(10),
        };
        assert!(timeout.is_retryable());

        let decode = ApiError::Decode {
            url: "http://upstream.test/v1/tags".to_string(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert!(!decode.is_retryable());
        assert!(!ApiError::Url("nope".to_string()).is_retryable());
    }

    #[test]
    fn not_found_is_detected_from_status() {
        assert!(status(404).is_not_found());
        assert!(!status(500).is_not_found());
    }
}
