use std::env;

use crate::error::AppError;
use crate::prompts::NEO4J_AGENT_PROMPT;

/// Default cap on model round-trips for a single question.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub graph: GraphConfig,
    pub agent: AgentConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
}

/// Chat-completion API configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: Option<f64>,
}

/// Neo4j HTTP endpoint configuration
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub url: String,
    /// Database name, used as the target endpoint for every query.
    pub database: String,
    pub username: String,
    pub password: String,
}

/// Agent loop configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub system_prompt: String,
    pub max_iterations: u32,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let llm = LlmConfig {
            api_key: env::var("LLM_API_KEY").map_err(|_| AppError::Config {
                message: "LLM_API_KEY is required".to_string(),
            })?,
            base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            temperature: env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok()),
        };

        let graph = GraphConfig {
            url: env::var("NEO4J_URL").unwrap_or_else(|_| "http://localhost:7474".to_string()),
            database: env::var("NEO4J_DATABASE").unwrap_or_else(|_| "neo4j".to_string()),
            username: env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
            password: env::var("NEO4J_PASSWORD").map_err(|_| AppError::Config {
                message: "NEO4J_PASSWORD is required".to_string(),
            })?,
        };

        let agent = AgentConfig {
            system_prompt: env::var("AGENT_SYSTEM_PROMPT")
                .unwrap_or_else(|_| NEO4J_AGENT_PROMPT.to_string()),
            max_iterations: env::var("AGENT_MAX_ITERATIONS")
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(DEFAULT_MAX_ITERATIONS)
                .max(1),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
            max_retries: env::var("MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            retry_delay_ms: env::var("RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
        };

        Ok(Config {
            llm,
            graph,
            agent,
            logging,
            request,
        })
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: NEO4J_AGENT_PROMPT.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}
