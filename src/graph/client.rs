use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use super::{GraphClient, QueryParams, QueryResult, Record};
use crate::config::{GraphConfig, RequestConfig};
use crate::error::{GraphError, GraphResult};

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: [Statement<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'a str,
    parameters: &'a QueryParams,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
struct RowData {
    #[serde(default)]
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Client for the Neo4j HTTP transactional endpoint.
///
/// Every query runs in its own auto-committed transaction, so a single
/// statement is atomic from the caller's point of view.
#[derive(Clone)]
pub struct Neo4jClient {
    client: Client,
    base_url: String,
    database: String,
    username: String,
    password: String,
    timeout_ms: u64,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub fn new(config: &GraphConfig, request_config: &RequestConfig) -> GraphResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(GraphError::Http)?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            timeout_ms: request_config.timeout_ms,
        })
    }

    /// Commit endpoint for the configured database
    pub fn commit_url(&self) -> String {
        format!("{}/db/{}/tx/commit", self.base_url, self.database)
    }

    /// Target database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[async_trait]
impl GraphClient for Neo4jClient {
    async fn execute_query(&self, query: &str, params: QueryParams) -> GraphResult<QueryResult> {
        let start = Instant::now();
        debug!(
            database = %self.database,
            params = params.len(),
            "Executing Cypher statement"
        );

        let body = TxRequest {
            statements: [Statement {
                statement: query,
                parameters: &params,
            }],
        };

        let response = self
            .client
            .post(self.commit_url())
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GraphError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    GraphError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                database = %self.database,
                status = status.as_u16(),
                "Neo4j request rejected"
            );
            return Err(GraphError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let tx: TxResponse = response
            .json()
            .await
            .map_err(|e| GraphError::InvalidResponse {
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(err) = tx.errors.into_iter().next() {
            error!(
                database = %self.database,
                code = %err.code,
                "Cypher statement failed"
            );
            return Err(GraphError::Query {
                code: err.code,
                message: err.message,
            });
        }

        let records = tx
            .results
            .into_iter()
            .next()
            .map(|result| {
                let columns = result.columns;
                result
                    .data
                    .into_iter()
                    .map(|data| Record::new(columns.clone(), data.row))
                    .collect()
            })
            .unwrap_or_default();

        let result = QueryResult { records };
        debug!(
            database = %self.database,
            rows = result.len(),
            latency_ms = start.elapsed().as_millis(),
            "Cypher statement completed"
        );

        Ok(result)
    }
}
