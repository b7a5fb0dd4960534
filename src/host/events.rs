use crate::error::HostError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Formatting hint attached to content handed back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Markdown,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Progress and output events pushed to the host while an action runs.
///
/// Serializes as `{"type": "status", "data": {...}}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum HostEvent {
    Status {
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        done: Option<bool>,
    },
    Message {
        content: String,
        format: MessageFormat,
    },
    Notification {
        #[serde(rename = "type")]
        level: NotificationLevel,
        content: String,
    },
}

impl HostEvent {
    pub fn status(description: impl Into<String>, done: Option<bool>) -> Self {
        HostEvent::Status {
            description: description.into(),
            done,
        }
    }
}

/// An `input` request the host shows to the user while the builder is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRequest {
    pub title: String,
    pub message: String,
    pub placeholder: String,
    pub html: String,
}

/// Fire-and-forget channel to the host UI.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: HostEvent) -> Result<(), HostError>;
}

/// Blocking round-trip to the host: shows `request` and returns what the user
/// submitted, or `None` if the dialog was dismissed.
pub trait EventCall: Send + Sync {
    fn call(&self, request: InputRequest) -> Result<Option<Value>, HostError>;
}

/// What an action returns to the host for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<MessageFormat>,
}

impl ActionResponse {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: None,
        }
    }

    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: Some(MessageFormat::Markdown),
        }
    }
}

/// The invoking user as the host describes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// The conversation body an action receives and hands back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatBody {
    pub messages: Vec<ChatMessage>,
}

impl ChatBody {
    pub fn last_message_mut(&mut self) -> Option<&mut ChatMessage> {
        self.messages.last_mut()
    }
}
