//! ZeroVeil Client - send chat messages to the ZeroVeil privacy relay.
//!
//! The client is deliberately thin: it posts a message list to the relay's
//! `chat/completions` route and parses the reply. Routing, tier selection and
//! model choice all happen on the relay.
//!
//! # Example
//!
//! ```rust,no_run
//! use zeroveil_client::{SendOptions, ZeroVeilClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ZeroVeilClient::from_env()?;
//!
//! let response = client
//!     .send("What is the capital of France?", Some("Answer in one word"))
//!     .await?;
//! println!("{}", response.content);
//!
//! // Allow providers that retain data, with a larger attempt budget
//! let options = SendOptions::default().with_zdr_only(false).with_max_retries(5);
//! let response = client.send_with("Hello", None, options).await?;
//! println!("served by {:?}", response.model);
//! # Ok(())
//! # }
//! ```
//!
//! # Retry Model
//!
//! Transport failures (connection, timeout, non-2xx status, unreadable body)
//! are retried with exponential backoff: the wait after attempt `i` (0-based)
//! is `2^i` seconds. A well-formed reply without choices is an application
//! error and is returned immediately.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use client::{create_client, SendOptions, ZeroVeilClient};
pub use error::{ClientError, Result, TransportError};
pub use retry::{RetryPolicy, RetryState};
pub use transport::{RelayRequest, ReqwestTransport, Transport, TransportResponse};
pub use types::{ChatRequest, Message, Response, Role, Usage};
