//! Conversation session: ordered message history and the query cycle.
//!
//! The session owns the append-only message history for the assistant
//! surface. `send_query` appends the user message synchronously (optimistic,
//! before any network round-trip), issues exactly one backend query, and
//! produces exactly one assistant message for it regardless of success or
//! failure.
//!
//! Input is not disabled while a query is awaited, so several queries can be
//! in flight at once. Each in-flight request is tagged with the id of its
//! triggering user message and the reply is inserted directly after that
//! message, keeping request/response adjacency stable even when responses
//! complete out of order.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use arkos_types::{ConversationMessage, MessageRole};

use crate::error::{ArkosError, Result};
use crate::gateway::BackendGateway;

/// Fallback answer used when the backend response carries no answer field.
pub const NO_ANSWER_FALLBACK: &str = "I could not find an answer to your query.";

/// Fixed assistant message appended when a query fails.
pub const QUERY_ERROR_MESSAGE: &str =
    "There was an error processing your query. Please try again.";

/// Callback invoked with the full history after every change.
pub type SessionListener = Arc<dyn Fn(&[ConversationMessage]) + Send + Sync>;

/// Owns the ordered message history and the send/receive cycle for
/// document-grounded queries.
pub struct ConversationSession {
    /// Append-only message history. Mutated only through this controller.
    messages: RwLock<Vec<ConversationMessage>>,
    gateway: Arc<dyn BackendGateway>,
    listeners: RwLock<Vec<SessionListener>>,
}

impl ConversationSession {
    /// Creates an empty session backed by the given gateway.
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            gateway,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the current message history.
    pub async fn messages(&self) -> Vec<ConversationMessage> {
        self.messages.read().await.clone()
    }

    /// Registers a listener invoked after every history change.
    pub async fn subscribe(&self, listener: SessionListener) {
        self.listeners.write().await.push(listener);
    }

    /// Sends a document-grounded query.
    ///
    /// The user message is visible in the history before the network
    /// round-trip completes. On success the backend's answer is inserted as
    /// an assistant message directly after the user message; a response with
    /// no answer field falls back to [`NO_ANSWER_FALLBACK`]; a failed request
    /// inserts [`QUERY_ERROR_MESSAGE`]. Asynchronous failures never escape
    /// this method.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `text` is empty after trimming; no
    /// message is appended and no request is issued in that case.
    pub async fn send_query(&self, text: &str) -> Result<()> {
        let query = text.trim();
        if query.is_empty() {
            return Err(ArkosError::validation("query text must not be empty"));
        }

        let user_id = self.append(MessageRole::User, query.to_string()).await;
        tracing::debug!(target: "session", message_id = %user_id, "query dispatched");

        let content = match self.gateway.query_document(query).await {
            Ok(Some(answer)) if !answer.trim().is_empty() => answer,
            Ok(_) => NO_ANSWER_FALLBACK.to_string(),
            Err(err) => {
                tracing::warn!(target: "session", error = %err, "query failed");
                QUERY_ERROR_MESSAGE.to_string()
            }
        };

        self.insert_reply_after(&user_id, content).await;
        Ok(())
    }

    /// Appends an assistant message at the tail of the history.
    ///
    /// Used by the application wiring for session-level notices such as the
    /// document-ready greeting.
    pub async fn append_assistant(&self, content: impl Into<String>) {
        self.append(MessageRole::Assistant, content.into()).await;
    }

    /// Discards the whole history.
    ///
    /// Replies still in flight for discarded user messages are dropped when
    /// they arrive, since their target message no longer exists.
    pub async fn reset(&self) {
        self.messages.write().await.clear();
        self.notify().await;
    }

    async fn append(&self, role: MessageRole, content: String) -> String {
        let message = ConversationMessage {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now().to_rfc3339(),
        };
        let id = message.id.clone();
        self.messages.write().await.push(message);
        self.notify().await;
        id
    }

    /// Inserts the assistant reply directly after its triggering user
    /// message. A reply whose user message is gone (session reset) is
    /// discarded: its intent no longer exists.
    async fn insert_reply_after(&self, user_id: &str, content: String) {
        let mut messages = self.messages.write().await;
        let Some(position) = messages.iter().position(|m| m.id == user_id) else {
            tracing::debug!(target: "session", message_id = %user_id, "dropping stale reply");
            return;
        };
        messages.insert(
            position + 1,
            ConversationMessage {
                id: Uuid::new_v4().to_string(),
                role: MessageRole::Assistant,
                content,
                timestamp: Utc::now().to_rfc3339(),
            },
        );
        drop(messages);
        self.notify().await;
    }

    async fn notify(&self) {
        let snapshot = self.messages.read().await.clone();
        let listeners = self.listeners.read().await;
        for listener in listeners.iter() {
            listener(&snapshot);
        }
    }
}
