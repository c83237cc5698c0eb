//! Unit tests for chat-completion wire types.
//!
//! Covers message constructors, role-tagged serialization, tool definitions
//! and response parsing.

use super::*;
use serde_json::json;

// ChatMessage tests
#[test]
fn test_message_constructors() {
    assert_eq!(ChatMessage::system("sys").content(), Some("sys"));
    assert_eq!(ChatMessage::user("hello").content(), Some("hello"));
    assert_eq!(ChatMessage::assistant("hi").content(), Some("hi"));
    assert_eq!(ChatMessage::tool("c: 5", "call_1").content(), Some("c: 5"));
}

#[test]
fn test_system_message_serialization() {
    let json = serde_json::to_value(ChatMessage::system("You are helpful")).unwrap();
    assert_eq!(json, json!({"role": "system", "content": "You are helpful"}));
}

#[test]
fn test_tool_message_carries_call_id() {
    let json = serde_json::to_value(ChatMessage::tool("c: 5", "call_abc")).unwrap();
    assert_eq!(
        json,
        json!({"role": "tool", "content": "c: 5", "tool_call_id": "call_abc"})
    );
}

#[test]
fn test_assistant_message_with_tool_calls_serialization() {
    let message = ChatMessage::Assistant(AssistantMessage {
        content: None,
        tool_calls: vec![ToolCall::new("call_1", "get_schema", "{}")],
    });
    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["role"], "assistant");
    assert!(json["content"].is_null());
    assert_eq!(json["tool_calls"][0]["id"], "call_1");
    assert_eq!(json["tool_calls"][0]["type"], "function");
    assert_eq!(json["tool_calls"][0]["function"]["name"], "get_schema");
    assert_eq!(json["tool_calls"][0]["function"]["arguments"], "{}");
}

#[test]
fn test_plain_assistant_message_omits_tool_calls() {
    let json = serde_json::to_value(ChatMessage::assistant("done")).unwrap();
    assert!(json.get("tool_calls").is_none());
}

#[test]
fn test_message_deserialization_by_role() {
    let message: ChatMessage =
        serde_json::from_value(json!({"role": "user", "content": "question"})).unwrap();
    assert_eq!(message, ChatMessage::user("question"));

    let message: ChatMessage = serde_json::from_value(json!({
        "role": "tool",
        "content": "ok",
        "tool_call_id": "call_9"
    }))
    .unwrap();
    assert_eq!(message, ChatMessage::tool("ok", "call_9"));
}

// ToolDefinition tests
#[test]
fn test_tool_definition_without_parameters() {
    let tool = ToolDefinition::function("get_schema", "Read the schema");
    let json = serde_json::to_value(&tool).unwrap();

    assert_eq!(json["type"], "function");
    assert_eq!(json["function"]["name"], "get_schema");
    assert!(json["function"].get("parameters").is_none());
    assert_eq!(json["function"]["strict"], false);
    assert_eq!(tool.name(), "get_schema");
}

#[test]
fn test_tool_definition_with_parameters() {
    let tool = ToolDefinition::function("execute_query", "Run Cypher")
        .with_parameters(json!({"type": "object"}))
        .with_strict(true);

    assert_eq!(tool.function.parameters, Some(json!({"type": "object"})));
    assert!(tool.function.strict);
}

// ChatRequest tests
#[test]
fn test_chat_request_new() {
    let request = ChatRequest::new(vec![ChatMessage::user("q")]);
    assert_eq!(request.messages.len(), 1);
    assert!(request.tools.is_empty());
    assert!(request.tool_choice.is_none());
    assert_eq!(request.response_format.format_type, ResponseFormatType::Text);
}

#[test]
fn test_chat_request_with_tools_sets_auto_choice() {
    let request = ChatRequest::new(vec![])
        .with_tools(vec![ToolDefinition::function("get_schema", "schema")])
        .with_temperature(0.2);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["tool_choice"], "auto");
    assert_eq!(json["response_format"], json!({"type": "text"}));
    assert_eq!(json["tools"][0]["function"]["name"], "get_schema");
    assert_eq!(json["temperature"], 0.2);
}

// Response tests
#[test]
fn test_completion_response_with_tool_calls() {
    let response: ChatCompletionResponse = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "execute_query", "arguments": "{\"query\":\"MATCH (n) RETURN n\"}"}
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
    .unwrap();

    let message = &response.choices[0].message;
    assert!(message.has_tool_calls());
    assert!(message.content.is_none());
    assert_eq!(message.tool_calls[0].function.name, "execute_query");
    assert_eq!(response.usage.unwrap().total_tokens, Some(15));
}

#[test]
fn test_completion_response_text_only() {
    let response: ChatCompletionResponse = serde_json::from_value(json!({
        "choices": [{
            "message": {"role": "assistant", "content": "There are 5 nodes."},
            "finish_reason": "stop"
        }]
    }))
    .unwrap();

    let message = &response.choices[0].message;
    assert!(!message.has_tool_calls());
    assert_eq!(message.content.as_deref(), Some("There are 5 nodes."));
    assert!(response.id.is_none());
}
