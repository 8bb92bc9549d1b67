//! Error types for the relay client.

use thiserror::Error;
use zeroveil_core::ConfigError;

/// Errors that can occur while talking to the relay.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No API key configured at construction time
    #[error(
        "API key required: set the ZEROVEIL_API_KEY environment variable or pass a config with api_key"
    )]
    AuthConfiguration,

    /// Config could not be loaded from the environment
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport failure that persisted through every attempt
    #[error("network error after {attempts} attempt(s): {source}")]
    Network {
        /// Number of attempts performed
        attempts: u32,
        /// The last transport failure
        #[source]
        source: TransportError,
    },

    /// The relay answered but returned no choices
    #[error("empty response from relay: no choices returned")]
    EmptyResponse,

    /// Caller supplied an unusable argument
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Whether retrying the whole call later might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// A single failed HTTP exchange.
///
/// Every variant is subject to the retry policy.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection could not be established (refused, DNS, TLS)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request exceeded the per-request timeout
    #[error("request timed out")]
    Timeout,

    /// Relay answered with a non-2xx status
    #[error("relay returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Response body was not the expected JSON
    #[error("failed to decode response JSON: {0}")]
    Decode(String),

    /// Any other request failure
    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Network {
            attempts: 3,
            source: TransportError::Status {
                status: 503,
                body: "Service Unavailable".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "network error after 3 attempt(s): relay returned status 503: Service Unavailable"
        );

        assert!(ClientError::AuthConfiguration
            .to_string()
            .contains("ZEROVEIL_API_KEY"));
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        let network = ClientError::Network {
            attempts: 1,
            source: TransportError::Timeout,
        };
        assert!(network.is_retryable());
        assert!(!ClientError::EmptyResponse.is_retryable());
        assert!(!ClientError::AuthConfiguration.is_retryable());
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::InvalidValue {
            field: "ZEROVEIL_TIMEOUT".to_string(),
            reason: "not a number".to_string(),
        };
        let err: ClientError = config_err.into();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
