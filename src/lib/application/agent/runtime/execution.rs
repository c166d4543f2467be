use super::{ToolError, ToolInvokeError, ToolRuntime, Value};
use tracing::{debug, info, warn};

/// Upper bound on tool text fed back to the model. Page snapshots can be large.
const TOOL_MESSAGE_LIMIT: usize = 16_000;

pub(crate) struct ToolExecution {
    pub tool: String,
    pub success: bool,
    pub input: Value,
    pub message: Option<String>,
}

impl ToolRuntime {
    /// Run one tool call.
    ///
    /// Mistakes the model can fix (unknown tool, tool-reported error) come back
    /// as an unsuccessful [`ToolExecution`]. Transport failures end the attempt.
    pub(crate) async fn execute(
        &self,
        tool_name: &str,
        input: Value,
    ) -> Result<ToolExecution, ToolError> {
        if tool_name.eq_ignore_ascii_case("list_tools") {
            let manifest = self.build_context().await;
            debug!("Agent requested tool catalogue via list_tools");
            let message = serde_json::to_string(&manifest.tools).ok();
            return Ok(ToolExecution {
                tool: "list_tools".to_string(),
                success: true,
                input,
                message,
            });
        }

        let arguments = match input.clone() {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        debug!(tool = %tool_name, "Dispatching tool via MCP");
        match self.session.call_tool(tool_name, arguments).await {
            Ok(result) => {
                let is_error = result
                    .get("isError")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let execution = ToolExecution {
                    tool: tool_name.to_string(),
                    success: !is_error,
                    input,
                    message: extract_tool_message(&result),
                };
                info!(tool = %execution.tool, success = execution.success, "Tool executed");
                Ok(execution)
            }
            Err(ToolInvokeError::UnknownTool { tool }) => {
                warn!(requested_tool = %tool, "Unknown tool requested by agent");
                Ok(ToolExecution {
                    message: Some(format!(
                        "Tool '{tool}' does not exist. Call list_tools to see the available tools."
                    )),
                    tool,
                    success: false,
                    input,
                })
            }
            Err(source) => {
                warn!(tool = %tool_name, %source, "Tool execution failed");
                Err(ToolError::Execution {
                    tool: tool_name.to_string(),
                    source,
                })
            }
        }
    }
}

/// Join every text block of a `tools/call` result. Images and other binary
/// blocks are dropped.
fn extract_tool_message(result: &Value) -> Option<String> {
    let mut text = result
        .get("content")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .filter(|block| {
                    block
                        .get("type")
                        .and_then(Value::as_str)
                        .is_some_and(|kind| kind.eq_ignore_ascii_case("text"))
                })
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .map(str::trim)
                .filter(|chunk| !chunk.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    if text.is_empty() {
        if let Some(structured) = result.get("structuredContent") {
            text = structured.to_string();
        }
    }

    if text.is_empty() {
        return None;
    }
    Some(truncate(text, TOOL_MESSAGE_LIMIT))
}

fn truncate(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text,
    }
}
