//! # Application Module
//!
//! ## Submodules
//!
//! - [`tooling`] - MCP tool servers over stdio
//! - [`agent`] - LLM agent that drives the tools
//! - [`retry`] - Bounded retry around one agent task
//! - [`prompt`] - The task prompt template
//! - [`sink`] - Writing the final answer to disk
//! - [`stdio`] - Reading the task from the terminal

pub mod agent;
pub mod prompt;
pub mod retry;
pub mod sink;
pub mod stdio;
pub mod tooling;
