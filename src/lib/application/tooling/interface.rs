use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::error::ToolInvokeError;

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerToolInfo {
    pub name: String,
    pub server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/// A live connection to one or more tool servers.
///
/// The agent only ever sees this trait, so tests can substitute a scripted
/// session for a real browser.
#[async_trait]
pub trait ToolSession: Send + Sync {
    /// Every tool currently advertised, in server order.
    async fn list_tools(&self) -> Vec<ServerToolInfo>;

    /// Dispatch `tools/call` to whichever server provides `tool`.
    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError>;

    /// `instructions` returned by the servers' `initialize` responses.
    async fn instructions(&self) -> Vec<(String, String)>;
}
