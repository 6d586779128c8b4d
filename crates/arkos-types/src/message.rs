//! Conversation message types.
//!
//! Messages form an append-only, totally ordered history owned by the
//! conversation session. A user message always precedes the assistant
//! message that answers it.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A single message in a conversation history.
///
/// Immutable once appended. The `id` correlates an in-flight query with the
/// user message that triggered it; the timestamp is informational only and
/// plays no part in ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Unique identifier for this message.
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Timestamp when the message was created (RFC 3339 format).
    pub timestamp: String,
}

impl ConversationMessage {
    /// Returns true if this message was sent by the user.
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Returns true if this message was sent by the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}
