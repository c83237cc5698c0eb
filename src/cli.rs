//! Command-line interface.
//!
//! `serve` runs the MCP server over stdio and is the default. `ask` answers a
//! single question from the terminal.

use clap::{Parser, Subcommand};

use crate::agent::{QuestionHandler, ThreadResponse};

/// Tool-calling agent that answers questions about a Neo4j graph.
#[derive(Parser, Debug)]
#[command(name = "neo4j-graph-agent", version, about)]
pub struct Cli {
    /// Command to run (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// Ask one question and print the answer
    Ask {
        /// The question about the graph
        question: String,

        /// Continue an existing thread
        #[arg(long = "thread")]
        thread_id: Option<String>,
    },
}

impl Cli {
    /// Selected command, falling back to `serve`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Result of CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Lines for stderr (the tool trace)
    pub trace: Vec<String>,
    /// Output message for stdout
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>, trace: Vec<String>) -> Self {
        Self {
            exit_code: 0,
            trace,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            trace: Vec::new(),
            message: message.into(),
        }
    }
}

/// Answer one question through the handler.
pub async fn execute_ask(
    handler: &QuestionHandler,
    question: &str,
    thread_id: Option<String>,
) -> CliResult {
    match handler.ask(question, thread_id).await {
        Ok(response) => format_response(response),
        Err(e) => CliResult::error(format!("Error: {}", e)),
    }
}

fn format_response(response: ThreadResponse) -> CliResult {
    let message = format!("{}\n\nthread: {}", response.answer, response.thread_id);
    CliResult::success(message, response.trace)
}
