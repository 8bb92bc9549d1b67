//! SDK-wide error type.

use thiserror::Error;
use zeroveil_client::ClientError;
use zeroveil_core::ConfigError;
use zeroveil_pii::PiiError;

/// Any error the SDK can return.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Relay client failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// PII scrubbing failure
    #[error(transparent)]
    Pii(#[from] PiiError),
}

/// Broad category of an [`Error`], for deciding what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transient; retrying the call later may succeed
    Retryable,
    /// Settings are missing or invalid
    Configuration,
    /// An optional component is not compiled in
    MissingDependency,
    /// The relay answered with something unusable
    Response,
    /// The caller passed an unusable argument
    Usage,
}

impl Error {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Client(err) => match err {
                ClientError::Network { .. } => ErrorKind::Retryable,
                ClientError::AuthConfiguration
                | ClientError::Config(_)
                | ClientError::Internal(_) => ErrorKind::Configuration,
                ClientError::EmptyResponse => ErrorKind::Response,
                ClientError::InvalidRequest(_) => ErrorKind::Usage,
            },
            Self::Pii(err) => match err {
                PiiError::BackendUnavailable { .. } => ErrorKind::MissingDependency,
                PiiError::UnsupportedLanguage(_) | PiiError::Engine(_) => ErrorKind::Usage,
            },
        }
    }

    /// Whether retrying later might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Retryable
    }
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use zeroveil_client::TransportError;

    #[test]
    fn test_error_kinds() {
        let err: Error = ClientError::Network {
            attempts: 3,
            source: TransportError::Timeout,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Retryable);
        assert!(err.is_retryable());

        let err: Error = ClientError::AuthConfiguration.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err: Error = ClientError::EmptyResponse.into();
        assert_eq!(err.kind(), ErrorKind::Response);

        let err: Error = ClientError::InvalidRequest("max_retries must be at least 1".into()).into();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err: Error = PiiError::BackendUnavailable {
            component: "analyzer",
            hint: "enable the `analyzer` feature of zeroveil-pii",
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::MissingDependency);
        assert!(!err.is_retryable());

        let err: Error = ConfigError::InvalidValue {
            field: "ZEROVEIL_TIMEOUT".to_string(),
            reason: "not a number".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_display_is_transparent() {
        let err: Error = ClientError::EmptyResponse.into();
        assert_eq!(err.to_string(), ClientError::EmptyResponse.to_string());
    }
}
