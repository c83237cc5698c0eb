use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::SharedState;
use crate::agent::AskParams;
use crate::error::{McpError, McpResult};

/// Name of the single tool exposed over MCP.
pub const ASK_GRAPH_QUESTION: &str = "ask_graph_question";

/// Route tool calls to appropriate handlers
pub async fn handle_tool_call(
    state: &SharedState,
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<Value> {
    info!(tool = %tool_name, "Routing tool call");

    match tool_name {
        ASK_GRAPH_QUESTION => handle_ask(state, arguments).await,
        _ => Err(McpError::UnknownTool {
            tool_name: tool_name.to_string(),
        }),
    }
}

/// Handle ask_graph_question tool call
async fn handle_ask(state: &SharedState, arguments: Option<Value>) -> McpResult<Value> {
    execute_handler(ASK_GRAPH_QUESTION, arguments, |params: AskParams| {
        state.questions.process(params)
    })
    .await
}

fn parse_arguments<T: serde::de::DeserializeOwned>(
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<T> {
    match arguments {
        Some(args) => serde_json::from_value(args).map_err(|e| McpError::InvalidParameters {
            tool_name: tool_name.to_string(),
            message: e.to_string(),
        }),
        None => Err(McpError::InvalidParameters {
            tool_name: tool_name.to_string(),
            message: "Missing arguments".to_string(),
        }),
    }
}

/// Parse typed arguments, run the operation and serialize its result.
///
/// Operation failures become [`McpError::ExecutionFailed`].
async fn execute_handler<P, R, E, F, Fut>(
    tool_name: &str,
    arguments: Option<Value>,
    operation: F,
) -> McpResult<Value>
where
    P: serde::de::DeserializeOwned,
    R: Serialize,
    E: std::fmt::Display,
    F: FnOnce(P) -> Fut,
    Fut: std::future::Future<Output = Result<R, E>>,
{
    let params: P = parse_arguments(tool_name, arguments)?;

    let result = operation(params)
        .await
        .map_err(|e| McpError::ExecutionFailed {
            message: e.to_string(),
        })?;

    serde_json::to_value(result).map_err(McpError::Json)
}
