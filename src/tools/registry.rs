use std::fmt;
use std::str::FromStr;

use super::params::{ObjectParam, Param};
use crate::llm::ToolDefinition;

/// Tools the agent may call against the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphTool {
    /// Introspect labels, relationship types and properties.
    GetSchema,
    /// Run a model-written Cypher query.
    ExecuteQuery,
}

impl GraphTool {
    /// All tools, in the order they are advertised.
    pub const ALL: [GraphTool; 2] = [GraphTool::GetSchema, GraphTool::ExecuteQuery];

    /// Wire name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            GraphTool::GetSchema => "get_schema",
            GraphTool::ExecuteQuery => "execute_query",
        }
    }

    /// Natural-language purpose shown to the model
    pub fn description(&self) -> &'static str {
        match self {
            GraphTool::GetSchema => {
                "Retrieve the database schema including node labels, relationship types, and properties."
            }
            GraphTool::ExecuteQuery => {
                "Execute a Cypher query against the Neo4j database and return the results."
            }
        }
    }

    /// Full definition advertised to the model
    pub fn definition(&self) -> ToolDefinition {
        match self {
            GraphTool::GetSchema => ToolDefinition::function(self.name(), self.description()),
            GraphTool::ExecuteQuery => {
                let params = ObjectParam::new()
                    .add_required_property("query", Param::string("The Cypher query to execute"));
                ToolDefinition::function(self.name(), self.description())
                    .with_parameters(params.to_value())
                    .with_strict(true)
            }
        }
    }
}

impl fmt::Display for GraphTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_schema" => Ok(GraphTool::GetSchema),
            "execute_query" => Ok(GraphTool::ExecuteQuery),
            _ => Err(format!("Unknown tool: {}", s)),
        }
    }
}

/// Ordered list of tool definitions for the chat request.
pub fn graph_tools() -> Vec<ToolDefinition> {
    GraphTool::ALL.iter().map(GraphTool::definition).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_order() {
        let names: Vec<_> = graph_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["get_schema", "execute_query"]);
    }

    #[test]
    fn test_schema_tool_takes_no_arguments() {
        let tool = GraphTool::GetSchema.definition();
        assert!(tool.function.parameters.is_none());
        assert!(!tool.function.strict);
    }

    #[test]
    fn test_query_tool_requires_query_and_rejects_extras() {
        let tool = GraphTool::ExecuteQuery.definition();
        let params = tool.function.parameters.unwrap();

        assert!(tool.function.strict);
        assert_eq!(params["type"], "object");
        assert_eq!(params["required"], json!(["query"]));
        assert_eq!(params["additionalProperties"], false);
        assert_eq!(params["properties"]["query"]["type"], "string");
    }

    #[test]
    fn test_name_round_trip() {
        for tool in GraphTool::ALL {
            assert_eq!(tool.name().parse::<GraphTool>().unwrap(), tool);
            assert_eq!(tool.to_string(), tool.name());
        }
        assert!("delete_everything".parse::<GraphTool>().is_err());
    }
}
