//! Server module for MCP protocol handling.
//!
//! This module provides:
//! - MCP server implementation over stdio
//! - Tool call handlers and routing
//! - Shared application state management

mod handlers;
mod mcp;

pub use handlers::*;
pub use mcp::*;

use std::sync::Arc;

use crate::agent::QuestionHandler;
use crate::config::Config;
use crate::error::AppResult;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Answers graph questions inside conversation threads.
    pub questions: QuestionHandler,
}

impl AppState {
    /// Create state from an already wired question handler
    pub fn new(config: Config, questions: QuestionHandler) -> Self {
        Self { config, questions }
    }

    /// Wire the production clients described by `config`
    pub fn from_config(config: Config) -> AppResult<Self> {
        let questions = QuestionHandler::from_config(&config)?;
        Ok(Self::new(config, questions))
    }
}

/// Shared application state handle.
pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AgentConfig, GraphConfig, LlmConfig, LogFormat, LoggingConfig, RequestConfig,
    };

    fn create_test_config() -> Config {
        Config {
            llm: LlmConfig {
                api_key: "test-key".to_string(),
                base_url: "http://localhost:1".to_string(),
                model: "test-model".to_string(),
                temperature: None,
            },
            graph: GraphConfig {
                url: "http://localhost:7474".to_string(),
                database: "neo4j".to_string(),
                username: "neo4j".to_string(),
                password: "secret".to_string(),
            },
            agent: AgentConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
            request: RequestConfig::default(),
        }
    }

    #[test]
    fn test_app_state_from_config() {
        let state = AppState::from_config(create_test_config()).unwrap();
        assert_eq!(state.config.graph.database, "neo4j");
    }

    #[test]
    fn test_shared_state_clones_share_config() {
        let state: SharedState = Arc::new(AppState::from_config(create_test_config()).unwrap());
        let other = Arc::clone(&state);
        assert_eq!(Arc::strong_count(&state), 2);
        assert_eq!(other.config.llm.model, "test-model");
    }
}
