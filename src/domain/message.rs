//! Inbound channel message and its normalization

use serde::{Deserialize, Deserializer, Serialize};

/// Message type used when a message carries no type of its own
pub const DEFAULT_MESSAGE_TYPE: &str = "info";

/// A message as delivered by the channel.
///
/// Older publishers send a bare string; newer ones send `{type, body}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Legacy plain-text message
    Text(String),
    /// Structured message with an optional type
    Structured {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default, deserialize_with = "body_text")]
        body: String,
    },
}

/// Accept any JSON body: strings verbatim, null as empty, the rest rendered
fn body_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Message {
    /// Create a structured message
    pub fn typed(kind: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Structured {
            kind: Some(kind.into()),
            body: body.into(),
        }
    }

    /// Normalize into a routable notification.
    ///
    /// Plain strings become `info` messages, and a missing or empty type
    /// falls back to [`DEFAULT_MESSAGE_TYPE`]. The body is passed through.
    pub fn normalize(self) -> Notification {
        let (kind, body) = match self {
            Self::Text(body) => (None, body),
            Self::Structured { kind, body } => (kind, body),
        };

        let kind = kind
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_MESSAGE_TYPE.to_string());

        Notification { kind, body }
    }
}

impl From<&str> for Message {
    fn from(body: &str) -> Self {
        Self::Text(body.to_string())
    }
}

impl From<String> for Message {
    fn from(body: String) -> Self {
        Self::Text(body)
    }
}

/// A normalized message: the type is always non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: String,
    pub body: String,
}
