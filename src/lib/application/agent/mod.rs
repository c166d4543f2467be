//! # Agent Module
//!
//! An LLM-driven loop that solves one task by calling MCP tools.
//!
//! ## Key Types
//!
//! - [`Agent`] - The main agent executor
//! - [`AgentOptions`] - Model, step bound and verbosity
//! - [`AgentOutcome`] - Result of agent execution
//! - [`ToolContext`] - Tool catalogue shown to the model
//! - [`AgentError`] - Errors that end an attempt
//!
//! ## Agent Loop
//!
//! 1. Send the conversation to the model
//! 2. Parse the JSON directive (asking for a correction on parse failure)
//! 3. If a tool call is requested, execute it and feed the result back
//! 4. If a final answer is given, or the step bound is hit, return

mod context;
mod errors;
mod models;
mod runner;
mod runtime;

#[cfg(test)]
mod tests;

pub use context::{ServerGuidance, ToolContext};
pub use errors::{AgentError, ToolError};
pub use models::{AgentOptions, AgentOutcome, AgentStep};
pub use runner::Agent;
