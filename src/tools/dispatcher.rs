use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::registry::GraphTool;
use super::ToolHandler;
use crate::error::ToolError;
use crate::graph::{GraphClient, QueryParams, QueryResult};
use crate::llm::ToolCall;

/// Returned when the schema introspection call gets no response.
pub const SCHEMA_ERROR: &str = "Error getting schema.";
/// Returned when a query call gets no response.
pub const QUERY_ERROR: &str = "Error executing query.";
/// Returned when a query succeeds with zero rows.
pub const NO_RESULTS: &str = "Query returned no results.";

/// Introspects node labels with their properties and relationship types with
/// their end-node labels and properties, as a single aggregated row.
pub const SCHEMA_QUERY: &str = "\
CALL apoc.meta.data() YIELD label, elementType, type, property \
WHERE elementType = 'node' \
WITH collect({label: label, property: property, propertyType: type}) AS nodes \
CALL apoc.meta.data() YIELD label, other, elementType, type, property \
WHERE elementType = 'relationship' \
WITH nodes, label AS relType, other AS endNodeLabel, \
collect({property: property, propertyType: type}) AS relProperties \
WITH nodes, collect({relationshipType: relType, endNodeLabel: endNodeLabel, properties: relProperties}) AS relationships \
RETURN {nodes: nodes, relationships: relationships} AS schema";

/// Arguments of the `execute_query` tool
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryArguments {
    pub query: String,
}

impl QueryArguments {
    /// Decode the raw argument string the model sent.
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments {
            tool_name: GraphTool::ExecuteQuery.name().to_string(),
            message: e.to_string(),
        })
    }
}

/// Routes tool calls to graph operations and renders results as text.
#[derive(Clone)]
pub struct GraphToolDispatcher {
    graph: Arc<dyn GraphClient>,
}

impl GraphToolDispatcher {
    /// Create a dispatcher backed by the given graph client
    pub fn new(graph: Arc<dyn GraphClient>) -> Self {
        Self { graph }
    }

    /// Run the fixed introspection query.
    pub async fn get_schema(&self) -> String {
        match self.graph.execute_query(SCHEMA_QUERY, QueryParams::new()).await {
            Ok(result) => render_lines(&result, false),
            Err(e) => {
                warn!(error = %e, "Schema introspection failed");
                SCHEMA_ERROR.to_string()
            }
        }
    }

    /// Decode `raw_arguments` and run the query verbatim, without bindings.
    pub async fn execute_query(&self, raw_arguments: &str) -> String {
        let args = match QueryArguments::parse(raw_arguments) {
            Ok(args) => args,
            Err(e) => {
                warn!(error = %e, "Rejected tool call arguments");
                return e.to_string();
            }
        };

        match self.graph.execute_query(&args.query, QueryParams::new()).await {
            Ok(result) => {
                let body = render_lines(&result, true);
                if body.is_empty() {
                    NO_RESULTS.to_string()
                } else {
                    body
                }
            }
            Err(e) => {
                warn!(error = %e, "Model query failed");
                QUERY_ERROR.to_string()
            }
        }
    }
}

#[async_trait]
impl ToolHandler for GraphToolDispatcher {
    async fn dispatch(&self, call: &ToolCall) -> String {
        let name = call.function.name.as_str();
        match name.parse::<GraphTool>() {
            Ok(GraphTool::GetSchema) => self.get_schema().await,
            Ok(GraphTool::ExecuteQuery) => self.execute_query(&call.function.arguments).await,
            Err(_) => {
                warn!(tool = %name, call_id = %call.id, "Ignoring call to unregistered tool");
                String::new()
            }
        }
    }
}

/// One flattened line per row, newline separated. With `skip_empty`, rows
/// that flatten to nothing are left out.
fn render_lines(result: &QueryResult, skip_empty: bool) -> String {
    debug!(rows = result.len(), "Rendering query result");
    result
        .records
        .iter()
        .map(|record| record.to_line())
        .filter(|line| !(skip_empty && line.is_empty()))
        .collect::<Vec<_>>()
        .join("\n")
}
