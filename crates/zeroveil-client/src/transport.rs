//! HTTP transport seam between the client and the network.
//!
//! The client builds a [`RelayRequest`] and hands it to a [`Transport`]. The
//! transport performs exactly one exchange and reports the raw status and
//! body; retrying and status interpretation stay in the client.

use crate::error::{ClientError, Result, TransportError};
use crate::types::ChatRequest;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// Trait for a single HTTP exchange with the relay.
///
/// Implementations must be thread-safe (Send + Sync) so a client can be
/// shared across tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the request body as JSON and return the raw reply.
    ///
    /// # Errors
    /// Returns error if no HTTP reply could be obtained.
    async fn post_json(
        &self,
        request: &RelayRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// A fully built relay request.
#[derive(Clone)]
pub struct RelayRequest {
    /// Target URL (`{endpoint}/chat/completions`)
    pub url: String,

    /// Bearer token
    pub api_key: String,

    /// JSON body
    pub body: ChatRequest,
}

impl RelayRequest {
    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl fmt::Debug for RelayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayRequest")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("messages", &self.body.messages.len())
            .field("zdr_only", &self.body.zdr_only)
            .finish()
    }
}

/// Raw reply from one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body text
    pub body: String,
}

impl TransportResponse {
    /// Create a reply with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with an optional per-request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        request: &RelayRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(&request.url)
            .header(AUTHORIZATION, request.authorization())
            .header(CONTENT_TYPE, "application/json")
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
