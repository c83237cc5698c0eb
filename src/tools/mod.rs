//! Tools the agent can call: their descriptions and their dispatch.
//!
//! - [`registry`]: the advertised tool set and its JSON-schema contracts
//! - [`params`]: the schema builder used to describe arguments
//! - [`dispatcher`]: routing a model's tool call to a graph operation

pub mod dispatcher;
pub mod params;
pub mod registry;

pub use dispatcher::{
    GraphToolDispatcher, QueryArguments, NO_RESULTS, QUERY_ERROR, SCHEMA_ERROR, SCHEMA_QUERY,
};
pub use params::{ObjectParam, Param};
pub use registry::{graph_tools, GraphTool};

use async_trait::async_trait;

use crate::llm::ToolCall;

/// Turns one tool call into the text fed back to the model.
///
/// Implementations never fail: problems are reported as sentinel strings so
/// the model can react to them in its next step.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the call and return its textual result.
    async fn dispatch(&self, call: &ToolCall) -> String;
}
