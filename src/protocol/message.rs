use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A2A message exchanged in `message/send` params and results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: String,
    pub parts: Vec<Part>,
    #[serde(default = "default_message_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_task_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

fn default_message_kind() -> String {
    "message".into()
}

/// A single message part, discriminated by `kind`.
///
/// Only text is understood; any other kind deserializes to
/// [`Part::Unsupported`] and is skipped by text extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text(TextPart),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart {
            text: text.into(),
            metadata: None,
        })
    }
}

impl Message {
    /// Build the agent reply carrying `text` as its only part.
    ///
    /// Every call gets a fresh v4 UUID as `messageId`.
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self {
            role: "agent".into(),
            parts: vec![Part::text(text)],
            kind: default_message_kind(),
            message_id: Some(Uuid::new_v4().to_string()),
            task_id: None,
            context_id: None,
            extensions: None,
            reference_task_ids: None,
            metadata: None,
        }
    }
}

/// First `kind: "text"` part of a raw message whose `text` is a non-empty
/// string.
///
/// Only `parts` is read. Other message fields may be absent or of any shape,
/// and parts that are not objects or lack `kind` are skipped.
pub fn first_text_part(message: &Value) -> Option<&str> {
    message
        .get("parts")?
        .as_array()?
        .iter()
        .filter(|part| part.get("kind").and_then(Value::as_str) == Some("text"))
        .find_map(|part| part.get("text").and_then(Value::as_str).filter(|t| !t.is_empty()))
}
