//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// A chat-completion backend the agent can reason with.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send the full conversation and return the assistant's next message
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
