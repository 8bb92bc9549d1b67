//! The relay client.

use crate::error::{ClientError, Result, TransportError};
use crate::retry::RetryPolicy;
use crate::transport::{RelayRequest, ReqwestTransport, Transport, TransportResponse};
use crate::types::{ChatRequest, CompletionBody, Message, Response};
use std::sync::Arc;
use zeroveil_core::{load_config, ZeroVeilConfig};

/// Default attempt budget for a send.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Per-call send options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    /// Only route to Zero Data Retention providers
    pub zdr_only: bool,

    /// Total attempt budget (must be at least 1)
    pub max_retries: u32,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            zdr_only: true,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl SendOptions {
    /// Set the Zero Data Retention flag.
    #[must_use]
    pub fn with_zdr_only(mut self, zdr_only: bool) -> Self {
        self.zdr_only = zdr_only;
        self
    }

    /// Set the attempt budget.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Client for the ZeroVeil relay API.
///
/// Holds an immutable config and a transport. Cheap to clone.
#[derive(Clone)]
pub struct ZeroVeilClient {
    config: ZeroVeilConfig,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ZeroVeilClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroVeilClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ZeroVeilClient {
    /// Create a client with the production `reqwest` transport.
    ///
    /// # Errors
    /// Returns [`ClientError::AuthConfiguration`] if the config has no API key.
    pub fn new(config: ZeroVeilConfig) -> Result<Self> {
        let api_key = require_api_key(&config)?;
        let transport = ReqwestTransport::new(config.request_timeout())?;

        Ok(Self {
            config,
            api_key,
            transport: Arc::new(transport),
        })
    }

    /// Create a client from the `ZEROVEIL_*` environment variables.
    ///
    /// # Errors
    /// Returns error if the environment holds an invalid timeout or no API key.
    pub fn from_env() -> Result<Self> {
        Self::new(load_config()?)
    }

    /// Create a client with a custom transport.
    ///
    /// # Errors
    /// Returns [`ClientError::AuthConfiguration`] if the config has no API key.
    pub fn with_transport(config: ZeroVeilConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let api_key = require_api_key(&config)?;

        Ok(Self {
            config,
            api_key,
            transport,
        })
    }

    /// The connection config this client was built with.
    #[must_use]
    pub fn config(&self) -> &ZeroVeilConfig {
        &self.config
    }

    /// Send a prompt with default options (ZDR only, 3 attempts).
    ///
    /// The prompt should already be scrubbed of PII.
    pub async fn send(&self, prompt: &str, system_prompt: Option<&str>) -> Result<Response> {
        self.send_with(prompt, system_prompt, SendOptions::default()).await
    }

    /// Send a prompt with explicit options.
    ///
    /// A `None` or empty system prompt is left out of the conversation.
    pub async fn send_with(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: SendOptions,
    ) -> Result<Response> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt.filter(|s| !s.is_empty()) {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        self.send_messages_with(messages, options).await
    }

    /// Send a pre-built conversation with default options.
    pub async fn send_messages(&self, messages: Vec<Message>) -> Result<Response> {
        self.send_messages_with(messages, SendOptions::default()).await
    }

    /// Send a pre-built conversation with explicit options.
    ///
    /// # Errors
    /// - [`ClientError::InvalidRequest`] if `options.max_retries` is zero
    /// - [`ClientError::Network`] if every attempt failed in transport
    /// - [`ClientError::EmptyResponse`] if the relay returned no choices
    pub async fn send_messages_with(
        &self,
        messages: Vec<Message>,
        options: SendOptions,
    ) -> Result<Response> {
        let policy = RetryPolicy::new(options.max_retries)?;

        let request = RelayRequest {
            url: self.config.chat_completions_url(),
            api_key: self.api_key.clone(),
            body: ChatRequest {
                messages,
                zdr_only: options.zdr_only,
            },
        };

        tracing::debug!(
            "Sending {} message(s) to {} (zdr_only: {})",
            request.body.messages.len(),
            request.url,
            request.body.zdr_only
        );

        let body = policy.run(|_| self.exchange(&request)).await?;

        into_response(body)
    }

    /// One HTTP exchange. Non-2xx statuses and undecodable bodies count as
    /// transport failures.
    async fn exchange(
        &self,
        request: &RelayRequest,
    ) -> std::result::Result<CompletionBody, TransportError> {
        let reply = self.transport.post_json(request).await?;
        decode_reply(reply)
    }
}

/// Create a client, loading config from the environment when none is given.
///
/// # Errors
/// Returns error if the config cannot be loaded or has no API key.
pub fn create_client(config: Option<ZeroVeilConfig>) -> Result<ZeroVeilClient> {
    match config {
        Some(config) => ZeroVeilClient::new(config),
        None => ZeroVeilClient::from_env(),
    }
}

fn require_api_key(config: &ZeroVeilConfig) -> Result<String> {
    config
        .api_key()
        .map(str::to_string)
        .ok_or(ClientError::AuthConfiguration)
}

fn decode_reply(reply: TransportResponse) -> std::result::Result<CompletionBody, TransportError> {
    if !reply.is_success() {
        return Err(TransportError::Status {
            status: reply.status,
            body: reply.body,
        });
    }

    serde_json::from_str(&reply.body).map_err(|e| TransportError::Decode(e.to_string()))
}

fn into_response(mut body: CompletionBody) -> Result<Response> {
    let usage = body.usage();
    let model = body.model();

    let first = body
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(ClientError::EmptyResponse)?;

    let content = first
        .message
        .and_then(|message| message.content)
        .unwrap_or_default();

    Ok(Response {
        content,
        usage,
        model,
    })
}
