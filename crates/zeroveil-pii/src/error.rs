//! Error types for PII scrubbing.

use thiserror::Error;

/// Errors that can occur while scrubbing text.
#[derive(Error, Debug)]
pub enum PiiError {
    /// A scrubbing engine is not compiled in
    #[error("PII {component} not available: {hint}")]
    BackendUnavailable {
        /// Which engine is missing (`analyzer` or `anonymizer`)
        component: &'static str,
        /// How to get it
        hint: &'static str,
    },

    /// The recognizer has no support for the requested language
    #[error("unsupported language for PII recognition: {0}")]
    UnsupportedLanguage(String),

    /// Engine-specific failure
    #[error("PII engine error: {0}")]
    Engine(String),
}

/// Result type alias for PII operations.
pub type PiiResult<T> = std::result::Result<T, PiiError>;
