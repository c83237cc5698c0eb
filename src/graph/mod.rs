//! Graph-query collaborator.
//!
//! [`GraphClient`] runs a Cypher statement with named parameters and returns
//! tabular rows. An `Err` means no response object came back at all, which
//! callers must keep distinct from a successful query with zero rows.

mod client;

pub use client::Neo4jClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::GraphResult;

/// Named parameter bindings for a query.
pub type QueryParams = BTreeMap<String, Value>;

/// One result row as parallel arrays of column names and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub keys: Vec<String>,
    pub values: Vec<Value>,
}

/// Ordered rows returned by a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub records: Vec<Record>,
}

/// Executes Cypher against a graph database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Run `query` verbatim with the given parameters.
    async fn execute_query(&self, query: &str, params: QueryParams) -> GraphResult<QueryResult>;
}

impl Record {
    /// Create a record from parallel key/value arrays
    pub fn new(keys: Vec<String>, values: Vec<Value>) -> Self {
        Self { keys, values }
    }

    /// Look up a value by column name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| self.values.get(i))
    }

    /// Flatten into `key: value, key: value`, leaving out null values.
    pub fn to_line(&self) -> String {
        self.keys
            .iter()
            .zip(self.values.iter())
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| format!("{}: {}", key, display_value(value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl QueryResult {
    /// Whether the query returned no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Render a value the way a human reads it: strings bare, the rest as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        Record::new(
            pairs.iter().map(|(k, _)| k.to_string()).collect(),
            pairs.iter().map(|(_, v)| v.clone()).collect(),
        )
    }

    #[test]
    fn test_to_line_single_column() {
        assert_eq!(record(&[("c", json!(5))]).to_line(), "c: 5");
    }

    #[test]
    fn test_to_line_multiple_columns() {
        let line = record(&[("name", json!("Alice")), ("age", json!(42))]).to_line();
        assert_eq!(line, "name: Alice, age: 42");
    }

    #[test]
    fn test_to_line_skips_nulls() {
        let line = record(&[
            ("name", json!("Bob")),
            ("email", Value::Null),
            ("active", json!(true)),
        ])
        .to_line();
        assert_eq!(line, "name: Bob, active: true");
    }

    #[test]
    fn test_to_line_all_null_is_empty() {
        assert_eq!(record(&[("x", Value::Null)]).to_line(), "");
    }

    #[test]
    fn test_to_line_nested_values_render_as_json() {
        let line = record(&[("labels", json!(["Person", "Actor"]))]).to_line();
        assert_eq!(line, r#"labels: ["Person","Actor"]"#);
    }

    #[test]
    fn test_record_get() {
        let rec = record(&[("role", json!("user")), ("content", json!("hi"))]);
        assert_eq!(rec.get("content"), Some(&json!("hi")));
        assert_eq!(rec.get("missing"), None);
    }

    #[test]
    fn test_query_result_len() {
        let result = QueryResult {
            records: vec![record(&[("c", json!(1))])],
        };
        assert_eq!(result.len(), 1);
        assert!(!result.is_empty());
        assert!(QueryResult::default().is_empty());
    }
}
