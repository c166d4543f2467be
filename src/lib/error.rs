use crate::application::sink::SinkError;
use crate::application::tooling::ToolInvokeError;
use crate::config::ConfigError;
use crate::model::ModelError;
use std::io;
use thiserror::Error;

/// Failures that end the whole run. Agent failures never reach this type;
/// the retry wrapper absorbs them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to set up model client: {0}")]
    Model(#[from] ModelError),
    #[error("failed to connect to MCP server: {0}")]
    Connect(#[from] ToolInvokeError),
    #[error("failed to read task from terminal: {0}")]
    Input(#[from] io::Error),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
