//! Conversation persistence.
//!
//! Threads and their messages live in the same graph the agent queries:
//! `(:Thread)-[:HAS_MESSAGE]->(:Message)`. The [`ConversationStore`] trait is
//! the seam the question handler depends on.

mod graph_store;

pub use graph_store::GraphConversationStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageResult;
use crate::llm::ChatMessage;

/// A durable conversation identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Unique thread identifier.
    pub id: String,
    /// When the thread was created.
    pub created_at: DateTime<Utc>,
}

/// Author of a persisted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The person asking questions.
    User,
    /// The agent's final answer.
    Assistant,
}

impl Thread {
    /// Create a new thread with a fresh identifier
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Thread {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRole {
    /// Stored role string
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Map a stored role back. Only two roles are ever written, so anything
    /// other than `user` is the assistant.
    pub fn from_stored(role: &str) -> Self {
        if role == "user" {
            MessageRole::User
        } else {
            MessageRole::Assistant
        }
    }

    /// Build the chat message this role replays as
    pub fn message(&self, content: impl Into<String>) -> ChatMessage {
        match self {
            MessageRole::User => ChatMessage::user(content),
            MessageRole::Assistant => ChatMessage::assistant(content),
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence for threads and their question/answer turns.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create and persist a new thread.
    async fn create_thread(&self) -> StorageResult<Thread>;

    /// All messages of a thread, oldest first. Unknown threads yield an
    /// empty list.
    async fn load_history(&self, thread_id: &str) -> StorageResult<Vec<ChatMessage>>;

    /// Record one user message and one assistant message together.
    async fn append_turn(&self, thread_id: &str, question: &str, answer: &str)
        -> StorageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_new_has_unique_ids() {
        let a = Thread::new();
        let b = Thread::new();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_role_mapping() {
        assert_eq!(MessageRole::from_stored("user"), MessageRole::User);
        assert_eq!(MessageRole::from_stored("assistant"), MessageRole::Assistant);
        assert_eq!(MessageRole::from_stored("system"), MessageRole::Assistant);
        assert_eq!(MessageRole::User.to_string(), "user");
    }

    #[test]
    fn test_role_message() {
        assert_eq!(MessageRole::User.message("q"), ChatMessage::user("q"));
        assert_eq!(
            MessageRole::Assistant.message("a"),
            ChatMessage::assistant("a")
        );
    }
}
