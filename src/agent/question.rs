use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::ToolLoop;
use crate::config::{AgentConfig, Config};
use crate::error::{AppResult, ToolError};
use crate::graph::{GraphClient, Neo4jClient};
use crate::llm::{ChatModel, LlmClient, ToolDefinition};
use crate::storage::{ConversationStore, GraphConversationStore};
use crate::tools::{graph_tools, GraphToolDispatcher, ToolHandler};

/// Input parameters for a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskParams {
    /// Natural-language question about the graph
    pub question: String,
    /// Thread to continue (creates a new one if not provided)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Result of answering one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub answer: String,
    pub trace: Vec<String>,
    pub thread_id: String,
}

/// Answers questions inside persistent conversation threads.
///
/// One call resolves the thread, replays its history into the tool loop and
/// records the new question/answer pair. Calls share no mutable state, so a
/// single handler can serve concurrent questions.
#[derive(Clone)]
pub struct QuestionHandler {
    model: Arc<dyn ChatModel>,
    store: Arc<dyn ConversationStore>,
    tools: Arc<dyn ToolHandler>,
    definitions: Vec<ToolDefinition>,
    agent: AgentConfig,
    temperature: Option<f64>,
}

impl QuestionHandler {
    /// Create a handler from explicit collaborators
    pub fn new(
        model: Arc<dyn ChatModel>,
        store: Arc<dyn ConversationStore>,
        tools: Arc<dyn ToolHandler>,
        agent: AgentConfig,
    ) -> Self {
        Self {
            model,
            store,
            tools,
            definitions: graph_tools(),
            agent,
            temperature: None,
        }
    }

    /// Wire the production LLM and Neo4j clients from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let model = LlmClient::new(&config.llm, config.request.clone())?;
        let graph: Arc<dyn GraphClient> =
            Arc::new(Neo4jClient::new(&config.graph, &config.request)?);

        info!(
            model = %model.model(),
            graph_url = %config.graph.url,
            database = %config.graph.database,
            max_iterations = config.agent.max_iterations,
            "Question handler configured"
        );

        Ok(Self::new(
            Arc::new(model),
            Arc::new(GraphConversationStore::new(graph.clone())),
            Arc::new(GraphToolDispatcher::new(graph)),
            config.agent.clone(),
        )
        .with_temperature(config.llm.temperature))
    }

    /// Sampling temperature passed to the model
    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Answer a question, continuing `thread_id` or starting a new thread.
    ///
    /// A supplied thread id is trusted as-is. If the loop fails nothing is
    /// recorded for the turn.
    pub async fn ask(&self, question: &str, thread_id: Option<String>) -> AppResult<ThreadResponse> {
        let start = Instant::now();

        if question.trim().is_empty() {
            return Err(ToolError::Validation {
                field: "question".to_string(),
                reason: "Question cannot be empty".to_string(),
            }
            .into());
        }

        let thread_id = match thread_id {
            Some(id) => id,
            None => self.store.create_thread().await?.id,
        };

        let history = self.store.load_history(&thread_id).await?;
        debug!(thread_id = %thread_id, history = history.len(), "Answering question");

        let response = ToolLoop::new(self.model.as_ref(), self.tools.as_ref())
            .with_tools(self.definitions.clone())
            .with_max_iterations(self.agent.max_iterations)
            .with_temperature(self.temperature)
            .run(&self.agent.system_prompt, question, &history)
            .await?;

        self.store
            .append_turn(&thread_id, question, &response.answer)
            .await?;

        info!(
            thread_id = %thread_id,
            iterations = response.iterations,
            hit_limit = response.hit_limit,
            latency_ms = start.elapsed().as_millis(),
            "Question answered"
        );

        Ok(ThreadResponse {
            answer: response.answer,
            trace: response.trace.into_lines(),
            thread_id,
        })
    }

    /// Answer from deserialized tool parameters
    pub async fn process(&self, params: AskParams) -> AppResult<ThreadResponse> {
        self.ask(&params.question, params.thread_id).await
    }
}
