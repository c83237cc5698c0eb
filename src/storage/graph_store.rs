use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use super::{ConversationStore, MessageRole, Thread};
use crate::error::{StorageError, StorageResult};
use crate::graph::{GraphClient, QueryParams};
use crate::llm::ChatMessage;

pub(crate) const CREATE_THREAD_QUERY: &str = "\
CREATE (t:Thread {id: $thread_id, created: datetime($created)}) \
RETURN t.id AS thread_id";

// `seq` breaks the tie between the two messages of a turn, which share one
// statement timestamp.
pub(crate) const LOAD_HISTORY_QUERY: &str = "\
MATCH (t:Thread {id: $thread_id})-[:HAS_MESSAGE]->(m:Message) \
RETURN m.role AS role, m.content AS content \
ORDER BY m.datetime, coalesce(m.seq, 0)";

// Both messages are created by one statement, so a turn is never half-written.
// When no thread matches, nothing is created and `threads` is 0.
pub(crate) const APPEND_TURN_QUERY: &str = "\
MATCH (t:Thread {id: $thread_id}) \
CREATE (t)-[:HAS_MESSAGE]->(:Message {role: 'user', content: $question, datetime: datetime(), seq: 0}), \
(t)-[:HAS_MESSAGE]->(:Message {role: 'assistant', content: $answer, datetime: datetime(), seq: 1}) \
RETURN count(t) AS threads";

/// Conversation store backed by the graph database itself.
#[derive(Clone)]
pub struct GraphConversationStore {
    graph: Arc<dyn GraphClient>,
}

impl GraphConversationStore {
    /// Create a store that persists through the given graph client
    pub fn new(graph: Arc<dyn GraphClient>) -> Self {
        Self { graph }
    }
}

fn params<const N: usize>(pairs: [(&str, Value); N]) -> QueryParams {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[async_trait]
impl ConversationStore for GraphConversationStore {
    async fn create_thread(&self) -> StorageResult<Thread> {
        let thread = Thread::new();

        let result = self
            .graph
            .execute_query(
                CREATE_THREAD_QUERY,
                params([
                    ("thread_id", json!(thread.id)),
                    ("created", json!(thread.created_at.to_rfc3339())),
                ]),
            )
            .await?;

        let stored_id = result
            .records
            .first()
            .and_then(|r| r.get("thread_id"))
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::InvalidResponse {
                message: "Thread creation returned no thread id".to_string(),
            })?;

        if stored_id != thread.id {
            return Err(StorageError::InvalidResponse {
                message: format!("Thread created with unexpected id {}", stored_id),
            });
        }

        info!(thread_id = %thread.id, "Thread created");
        Ok(thread)
    }

    async fn load_history(&self, thread_id: &str) -> StorageResult<Vec<ChatMessage>> {
        let result = self
            .graph
            .execute_query(LOAD_HISTORY_QUERY, params([("thread_id", json!(thread_id))]))
            .await?;

        let messages: Vec<ChatMessage> = result
            .records
            .iter()
            .map(|record| {
                let role = record.get("role").and_then(Value::as_str).unwrap_or_default();
                let content = record
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                MessageRole::from_stored(role).message(content)
            })
            .collect();

        debug!(thread_id = %thread_id, messages = messages.len(), "History loaded");
        Ok(messages)
    }

    async fn append_turn(
        &self,
        thread_id: &str,
        question: &str,
        answer: &str,
    ) -> StorageResult<()> {
        let result = self
            .graph
            .execute_query(
                APPEND_TURN_QUERY,
                params([
                    ("thread_id", json!(thread_id)),
                    ("question", json!(question)),
                    ("answer", json!(answer)),
                ]),
            )
            .await?;

        let threads = result
            .records
            .first()
            .and_then(|r| r.get("threads"))
            .and_then(Value::as_u64)
            .unwrap_or(0);

        if threads == 0 {
            return Err(StorageError::ThreadNotFound {
                thread_id: thread_id.to_string(),
            });
        }

        debug!(thread_id = %thread_id, "Turn appended");
        Ok(())
    }
}
