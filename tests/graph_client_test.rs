//! Integration tests for the Neo4j HTTP client
//!
//! Tests statement encoding, auth and result mapping against a wiremock
//! stand-in for the transactional endpoint.

use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use neo4j_graph_agent::config::{GraphConfig, RequestConfig};
use neo4j_graph_agent::error::GraphError;
use neo4j_graph_agent::graph::{GraphClient, Neo4jClient, QueryParams};

const COMMIT_PATH: &str = "/db/neo4j/tx/commit";

fn create_test_client(base_url: &str) -> Neo4jClient {
    let config = GraphConfig {
        url: base_url.to_string(),
        database: "neo4j".to_string(),
        username: "neo4j".to_string(),
        password: "secret".to_string(),
    };
    let request_config = RequestConfig {
        timeout_ms: 5000,
        max_retries: 0,
        retry_delay_ms: 10,
    };

    Neo4jClient::new(&config, &request_config).expect("Failed to create client")
}

#[tokio::test]
async fn test_query_rows_are_mapped_to_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(header("Authorization", "Basic bmVvNGo6c2VjcmV0"))
        .and(body_json(json!({
            "statements": [{
                "statement": "MATCH (m:Movie) RETURN m.title AS title, m.released AS released",
                "parameters": {}
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "columns": ["title", "released"],
                "data": [
                    {"row": ["The Matrix", 1999], "meta": [null, null]},
                    {"row": ["Cloud Atlas", null], "meta": [null, null]}
                ]
            }],
            "errors": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let result = client
        .execute_query(
            "MATCH (m:Movie) RETURN m.title AS title, m.released AS released",
            QueryParams::new(),
        )
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.records[0].get("title"), Some(&json!("The Matrix")));
    assert_eq!(result.records[0].to_line(), "title: The Matrix, released: 1999");
    assert_eq!(result.records[1].to_line(), "title: Cloud Atlas");
}

#[tokio::test]
async fn test_parameters_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(body_json(json!({
            "statements": [{
                "statement": "MATCH (t:Thread {id: $thread_id}) RETURN t.id AS id",
                "parameters": {"thread_id": "t-1"}
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"columns": ["id"], "data": [{"row": ["t-1"]}]}],
            "errors": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut params = QueryParams::new();
    params.insert("thread_id".to_string(), json!("t-1"));

    let result = create_test_client(&mock_server.uri())
        .execute_query("MATCH (t:Thread {id: $thread_id}) RETURN t.id AS id", params)
        .await
        .unwrap();

    assert_eq!(result.records[0].to_line(), "id: t-1");
}

#[tokio::test]
async fn test_zero_rows_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"columns": ["n"], "data": []}],
            "errors": []
        })))
        .mount(&mock_server)
        .await;

    let result = create_test_client(&mock_server.uri())
        .execute_query("MATCH (n:Nothing) RETURN n", QueryParams::new())
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_cypher_error_is_query_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "errors": [{
                "code": "Neo.ClientError.Statement.SyntaxError",
                "message": "Invalid input 'MATC'"
            }]
        })))
        .mount(&mock_server)
        .await;

    let err = create_test_client(&mock_server.uri())
        .execute_query("MATC (n) RETURN n", QueryParams::new())
        .await
        .unwrap_err();

    match err {
        GraphError::Query { code, message } => {
            assert_eq!(code, "Neo.ClientError.Statement.SyntaxError");
            assert!(message.contains("MATC"));
        }
        other => panic!("Expected Query error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let err = create_test_client(&mock_server.uri())
        .execute_query("RETURN 1", QueryParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Nothing listens on the discard port.
    let err = create_test_client("http://127.0.0.1:9")
        .execute_query("RETURN 1", QueryParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GraphError::Http(_)));
}
