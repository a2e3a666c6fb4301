//! Transport error types.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport) for network or HTTP-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client error (connect, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The server returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The request URL could not be parsed or resolved.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not valid HTTP.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The response body is not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// The transport could not be built from configuration.
    #[error(transparent)]
    Config(#[from] verity_config::ConfigError),

    /// Failure raised by a third-party transport implementation.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap an arbitrary error from a custom transport.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }

    /// HTTP status associated with the failure, if the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_server_failures() {
        let api = TransportError::Api {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(api.status(), Some(503));
        assert_eq!(
            TransportError::RateLimited {
                retry_after_secs: 1
            }
            .status(),
            Some(429)
        );
        assert_eq!(TransportError::InvalidUrl("x".into()).status(), None);
    }

    #[test]
    fn other_wraps_custom_errors() {
        let err = TransportError::other("connection reset");
        assert!(matches!(err, TransportError::Other(_)));
        assert_eq!(err.to_string(), "connection reset");
    }
}
