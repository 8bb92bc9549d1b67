//! Error types for hardware probes.
//!
//! Probe errors stay inside detection: the detector logs them and moves on.

use thiserror::Error;

/// Errors a single probe can hit.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Backing tool or interface not present on this machine
    #[error("{0} not available")]
    NotInstalled(String),

    /// Tool ran but reported failure
    #[error("{command} exited with {status}")]
    CommandFailed {
        /// Program that was run
        command: String,
        /// Exit status as reported by the OS
        status: String,
    },

    /// Tool did not finish in time and was killed
    #[error("{command} timed out after {after:?}")]
    TimedOut {
        /// Program that was run
        command: String,
        /// Time allowed
        after: std::time::Duration,
    },

    /// Output could not be understood
    #[error("failed to parse {source_name}: {reason}")]
    Parse {
        /// Where the data came from
        source_name: String,
        /// What was wrong with it
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    pub(crate) fn parse(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for probe operations.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProbeError::NotInstalled("nvidia-smi".to_string());
        assert_eq!(err.to_string(), "nvidia-smi not available");

        let err = ProbeError::parse("/proc/meminfo", "missing MemTotal");
        assert_eq!(
            err.to_string(),
            "failed to parse /proc/meminfo: missing MemTotal"
        );
    }
}
