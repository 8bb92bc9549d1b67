//! Request and response types exchanged with the relay.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,

    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a message with an arbitrary role.
    #[must_use]
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Role of a message in a conversation.
///
/// Serialized as a plain lowercase string. Roles the relay may understand
/// but this crate does not name are carried through [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// System message (instructions, context)
    System,
    /// User message (prompt, question)
    User,
    /// Assistant message (response)
    Assistant,
    /// Any other role string
    Other(String),
}

impl Role {
    /// Wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            _ => Self::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body posted to `chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Ordered conversation
    pub messages: Vec<Message>,

    /// Only route to Zero Data Retention providers
    pub zdr_only: bool,
}

/// Response from the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Content of the first choice
    pub content: String,

    /// Token accounting, if the relay reported it
    pub usage: Option<Usage>,

    /// Backend model that served the request, if reported
    pub model: Option<String>,
}

/// Token usage statistics.
///
/// The common counters are typed; anything else the relay reports is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,

    /// Tokens in the completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,

    /// Total tokens as reported by the relay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,

    /// Other usage fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Usage {
    /// Build usage from whatever the relay put under `usage`.
    ///
    /// Counters that are not non-negative whole numbers (integers or
    /// integral floats) are kept in `extra` instead of being rejected.
    /// Returns `None` for anything other than a JSON object.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        let serde_json::Value::Object(mut extra) = value else {
            return None;
        };

        let mut take = |key: &str| {
            let count = extra.get(key).and_then(token_count)?;
            extra.remove(key);
            Some(count)
        };

        let prompt_tokens = take("prompt_tokens");
        let completion_tokens = take("completion_tokens");
        let total_tokens = take("total_tokens");

        Some(Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
            extra,
        })
    }

    /// Total tokens: the reported total, or prompt + completion.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total_tokens.or_else(|| {
            match (self.prompt_tokens, self.completion_tokens) {
                (None, None) => None,
                (prompt, completion) => {
                    Some(prompt.unwrap_or(0).saturating_add(completion.unwrap_or(0)))
                }
            }
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn token_count(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

// Wire shape of a successful relay reply. Every level is optional so that a
// missing field degrades instead of failing the decode. `usage` and `model`
// are informational and stay untyped until the reply is accepted.

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionBody {
    #[serde(default)]
    pub choices: Option<Vec<ChoiceBody>>,
    #[serde(default)]
    pub usage: Option<serde_json::Value>,
    #[serde(default)]
    pub model: Option<serde_json::Value>,
}

impl CompletionBody {
    pub(crate) fn usage(&mut self) -> Option<Usage> {
        self.usage.take().and_then(Usage::from_value)
    }

    pub(crate) fn model(&mut self) -> Option<String> {
        match self.model.take()? {
            serde_json::Value::String(model) => Some(model),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceBody {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
