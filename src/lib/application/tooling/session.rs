use super::error::ToolInvokeError;
use super::interface::{ServerToolInfo, ToolSession};
use super::process::McpProcess;
use crate::config::ConnectionDescriptor;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Client side of every server in a [`ConnectionDescriptor`].
///
/// Browser state lives in the server processes and is shared by every agent
/// attempt made through this session. A process that has exited is launched
/// again the next time a tool call is routed to it.
pub struct McpSession {
    processes: Vec<McpProcess>,
}

impl McpSession {
    /// Launch each server and complete the `initialize` / `tools/list`
    /// handshake. Any failure aborts the whole connection.
    pub async fn connect(descriptor: &ConnectionDescriptor) -> Result<Self, ToolInvokeError> {
        if descriptor.is_empty() {
            return Err(ToolInvokeError::NoServers);
        }

        let mut processes = Vec::with_capacity(descriptor.servers().len());
        for server in descriptor.servers() {
            let process = McpProcess::new(server.clone());
            process.ensure_running().await?;
            let tool_count = process.tools().await.len();
            info!(
                server = process.name(),
                tools = tool_count,
                "MCP server connected"
            );
            processes.push(process);
        }

        Ok(Self { processes })
    }

    /// Terminate every server process.
    pub async fn shutdown(&self) {
        for process in &self.processes {
            process.shutdown().await;
        }
    }

    /// Find the server advertising `tool`, relaunching exited servers on the
    /// way. A server that cannot be relaunched is skipped. Its launch error is
    /// returned only when no other server provides the tool.
    async fn route(&self, tool: &str) -> Result<&McpProcess, ToolInvokeError> {
        let mut launch_error = None;
        for process in &self.processes {
            if let Err(err) = process.ensure_running().await {
                warn!(server = process.name(), %err, "Skipping MCP server that failed to relaunch");
                launch_error.get_or_insert(err);
                continue;
            }
            if process.has_tool(tool).await {
                debug!(server = process.name(), tool, "Routing tool call");
                return Ok(process);
            }
        }
        Err(launch_error.unwrap_or_else(|| ToolInvokeError::UnknownTool {
            tool: tool.to_string(),
        }))
    }
}

#[async_trait]
impl ToolSession for McpSession {
    async fn list_tools(&self) -> Vec<ServerToolInfo> {
        let mut tools = Vec::new();
        for process in &self.processes {
            tools.extend(process.tools().await);
        }
        tools
    }

    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        let process = self.route(tool).await?;
        process.call_tool(tool, arguments).await
    }

    async fn instructions(&self) -> Vec<(String, String)> {
        let mut guidance = Vec::new();
        for process in &self.processes {
            if let Some(text) = process.instructions().await {
                guidance.push((process.name().to_string(), text));
            }
        }
        guidance
    }
}
