//! # Neo4j Graph Agent
//!
//! A tool-calling LLM agent that answers natural-language questions about a
//! Neo4j graph. The model inspects the schema and runs Cypher queries through
//! two tools until it can answer; each question/answer turn is stored as a
//! conversation thread in the same graph.
//!
//! ## Architecture
//!
//! ```text
//! MCP Client / CLI → QuestionHandler → ToolLoop ⇄ LLM (chat completions)
//!                          ↓               ↓
//!                   ConversationStore   GraphToolDispatcher
//!                          ↘               ↙
//!                         Neo4j (HTTP API)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use neo4j_graph_agent::{Config, QuestionHandler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let handler = QuestionHandler::from_config(&config)?;
//!     let response = handler.ask("How many movies are there?", None).await?;
//!     println!("{} (thread {})", response.answer, response.thread_id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Tool-calling loop and the thread-aware question handler.
pub mod agent;
/// Command-line interface.
pub mod cli;
/// Configuration management.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Neo4j query client and result types.
pub mod graph;
/// Chat-completion client and message types.
pub mod llm;
/// System prompt for the agent.
pub mod prompts;
/// MCP server implementation and request handling.
pub mod server;
/// Conversation threads persisted in the graph.
pub mod storage;
/// Tool registry and dispatcher.
pub mod tools;

pub use agent::{QuestionHandler, ThreadResponse};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use server::{AppState, McpServer, SharedState};
