//! The agent itself.
//!
//! [`ToolLoop`] drives the model through bounded rounds of tool calls for a
//! single question. [`QuestionHandler`] wraps it with thread resolution and
//! persistence of each question/answer turn.

mod question;
mod tool_loop;

pub use question::{AskParams, QuestionHandler, ThreadResponse};
pub use tool_loop::{
    AgentResponse, LoopTrace, ToolLoop, ITERATION_LIMIT_ANSWER, ITERATION_LIMIT_TRACE,
};
