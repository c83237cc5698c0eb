use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_MAX_ITERATIONS;
use crate::error::LlmResult;
use crate::llm::{AssistantMessage, ChatMessage, ChatModel, ChatRequest, ToolDefinition};
use crate::tools::ToolHandler;

/// Answer substituted when the model never stops calling tools.
pub const ITERATION_LIMIT_ANSWER: &str = "Unable to generate response within iteration limit.";
/// Trace line recorded when the iteration limit is hit.
pub const ITERATION_LIMIT_TRACE: &str = "Hit iteration limit without final response.";

/// Append-only, chronological log of one loop run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoopTrace {
    lines: Vec<String>,
}

impl LoopTrace {
    /// Append a line. Each line is also emitted as a debug event right away.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!(line = %line, "agent trace");
        self.lines.push(line);
    }

    /// Lines in the order they were recorded
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume into the owned lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Output of a loop run: final text plus the trace that led to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub answer: String,
    pub trace: LoopTrace,
    /// Model round-trips that requested tools.
    pub iterations: u32,
    /// Whether the iteration limit replaced the answer.
    pub hit_limit: bool,
}

/// Bounded tool-calling loop.
///
/// Each iteration sends the system prompt, prior thread messages, the
/// question, and (from the second iteration on) the previous assistant
/// message with that round's tool results. Older rounds are not re-sent.
pub struct ToolLoop<'a> {
    model: &'a dyn ChatModel,
    handler: &'a dyn ToolHandler,
    tools: Vec<ToolDefinition>,
    max_iterations: u32,
    temperature: Option<f64>,
}

impl<'a> ToolLoop<'a> {
    /// Create a loop with no tools and the default iteration limit
    pub fn new(model: &'a dyn ChatModel, handler: &'a dyn ToolHandler) -> Self {
        Self {
            model,
            handler,
            tools: Vec::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: None,
        }
    }

    /// Tools offered to the model on every iteration
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Cap on tool-calling iterations. Zero is treated as one.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Sampling temperature for every request
    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Drive the model until it answers in text or the limit is reached.
    ///
    /// Model failures abort the run. Tool failures never do: whatever the
    /// handler returns is handed to the model as-is.
    pub async fn run(
        &self,
        system_prompt: &str,
        question: &str,
        history: &[ChatMessage],
    ) -> LlmResult<AgentResponse> {
        let start = Instant::now();
        let mut trace = LoopTrace::default();
        let mut last_reply: Option<AssistantMessage> = None;
        let mut tool_results: Vec<ChatMessage> = Vec::new();
        let mut iterations: u32 = 0;
        let mut answer: Option<String> = None;

        loop {
            let messages = build_context(
                system_prompt,
                history,
                question,
                last_reply.as_ref(),
                &tool_results,
            );
            let mut request = ChatRequest::new(messages).with_tools(self.tools.clone());
            request.temperature = self.temperature;

            let reply = self.model.complete(request).await?;

            if !reply.has_tool_calls() {
                answer = Some(reply.content.unwrap_or_default());
                break;
            }

            trace.push(format!("Iteration {}:", iterations + 1));

            let mut round = Vec::with_capacity(reply.tool_calls.len());
            for call in &reply.tool_calls {
                trace.push(format!(
                    "Calling tool: {} with args: {}",
                    call.function.name, call.function.arguments
                ));
                let output = self.handler.dispatch(call).await;
                trace.push(format!("Tool response: {}", output));
                round.push(ChatMessage::tool(output, &call.id));
            }

            tool_results = round;
            last_reply = Some(reply);
            iterations += 1;

            if iterations >= self.max_iterations {
                break;
            }
        }

        let hit_limit = answer.is_none();
        let answer = answer.unwrap_or_else(|| {
            warn!(
                iterations = iterations,
                "Iteration limit reached without a final answer"
            );
            trace.push(ITERATION_LIMIT_TRACE);
            ITERATION_LIMIT_ANSWER.to_string()
        });

        info!(
            iterations = iterations,
            hit_limit = hit_limit,
            latency_ms = start.elapsed().as_millis(),
            "Tool loop finished"
        );

        Ok(AgentResponse {
            answer,
            trace,
            iterations,
            hit_limit,
        })
    }
}

/// Assemble the request messages for one iteration.
fn build_context(
    system_prompt: &str,
    history: &[ChatMessage],
    question: &str,
    last_reply: Option<&AssistantMessage>,
    tool_results: &[ChatMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + tool_results.len() + 3);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(question));
    if let Some(reply) = last_reply {
        messages.push(ChatMessage::Assistant(reply.clone()));
    }
    messages.extend_from_slice(tool_results);
    messages
}

#[cfg(test)]
#[path = "tool_loop_tests.rs"]
mod tool_loop_tests;
