//! Bounded retry with exponential backoff.
//!
//! The retry loop is an explicit state machine:
//!
//! ```text
//! Attempting(i) --ok--------------------------> Succeeded
//! Attempting(i) --err, i + 1 < max_attempts--> BackingOff(i, 2^i * base) --> Attempting(i + 1)
//! Attempting(i) --err, i + 1 == max_attempts-> Exhausted
//! ```
//!
//! Only [`TransportError`]s drive transitions. Anything the caller decides
//! after a successful exchange is outside the machine and never retried.

use crate::error::{ClientError, Result, TransportError};
use std::future::Future;
use std::time::Duration;

/// Attempt budget and backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before the second attempt; doubles after each further failure.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    /// Create a policy allowing `max_attempts` total attempts.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidRequest`] if `max_attempts` is zero.
    pub fn new(max_attempts: u32) -> Result<Self> {
        if max_attempts == 0 {
            return Err(ClientError::InvalidRequest(
                "max_retries must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_attempts,
            base_delay: Self::DEFAULT_BASE_DELAY,
        })
    }

    /// Override the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Total attempt budget.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the failed attempt with 0-based index `attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Next state after attempt `attempt` produced `outcome`.
    #[must_use]
    pub fn next_state<T>(
        &self,
        attempt: u32,
        outcome: std::result::Result<T, TransportError>,
    ) -> RetryState<T> {
        match outcome {
            Ok(value) => RetryState::Succeeded(value),
            Err(error) if attempt + 1 < self.max_attempts => RetryState::BackingOff {
                attempt,
                delay: self.delay_for(attempt),
                error,
            },
            Err(error) => RetryState::Exhausted {
                attempts: attempt + 1,
                error,
            },
        }
    }

    /// Drive `operation` through the state machine.
    ///
    /// `operation` receives the 0-based attempt index.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] carrying the last failure once the
    /// attempt budget is spent.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = std::result::Result<T, TransportError>>,
    {
        let mut state = RetryState::Attempting { attempt: 0 };

        loop {
            state = match state {
                RetryState::Attempting { attempt } => {
                    tracing::debug!("Relay attempt {}/{}", attempt + 1, self.max_attempts);
                    let outcome = operation(attempt).await;
                    self.next_state(attempt, outcome)
                }
                RetryState::BackingOff {
                    attempt,
                    delay,
                    error,
                } => {
                    tracing::warn!(
                        "Relay request failed (attempt {}/{}): {}, retrying in {:?}...",
                        attempt + 1,
                        self.max_attempts,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting {
                        attempt: attempt + 1,
                    }
                }
                RetryState::Succeeded(value) => return Ok(value),
                RetryState::Exhausted { attempts, error } => {
                    tracing::warn!(
                        "Relay request failed after {} attempt(s): {}",
                        attempts,
                        error
                    );
                    return Err(ClientError::Network {
                        attempts,
                        source: error,
                    });
                }
            };
        }
    }
}

/// States of the retry loop.
#[derive(Debug)]
pub enum RetryState<T> {
    /// About to perform the attempt with this 0-based index
    Attempting {
        /// Attempt index
        attempt: u32,
    },

    /// Attempt failed and budget remains
    BackingOff {
        /// Index of the failed attempt
        attempt: u32,
        /// Sleep before the next attempt
        delay: Duration,
        /// Why the attempt failed
        error: TransportError,
    },

    /// Attempt produced a value
    Succeeded(T),

    /// Attempt failed and the budget is spent
    Exhausted {
        /// Attempts performed
        attempts: u32,
        /// Last failure
        error: TransportError,
    },
}
