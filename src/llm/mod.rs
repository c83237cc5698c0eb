//! Chat-completion client and wire types for the LLM collaborator.
//!
//! The agent loop talks to the model only through [`ChatModel`], so tests can
//! swap in a scripted model while production uses [`LlmClient`].

mod client;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use client::LlmClient;
pub use types::*;

use async_trait::async_trait;

use crate::error::LlmResult;

/// A chat model that can answer with text or tool calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one request and return the first choice's message.
    async fn complete(&self, request: ChatRequest) -> LlmResult<AssistantMessage>;
}
