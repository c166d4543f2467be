use super::{ToolContext, ToolExecution, ToolRuntime, json};

const TOOL_RESULT_INSTRUCTION: &str = "Use this result to decide the next step. Respond with another call_tool action, or with a final action once the task is complete.";

const CORRECTION_INSTRUCTION: &str = "Your previous reply was not a valid action. Reply with exactly one JSON object: {\"action\":\"call_tool\",\"tool\":\"...\",\"input\":{...}} or {\"action\":\"final\",\"response\":\"...\"}.";

impl ToolRuntime {
    pub fn compose_system_instructions(&self, context: &ToolContext) -> String {
        let mut lines = vec![
            "You are an autonomous assistant that can call tools to solve user requests."
                .to_string(),
            "All responses must be valid JSON without commentary or code fences.".to_string(),
            "When you need to invoke a tool, respond with: {\"action\":\"call_tool\",\"tool\":\"tool_name\",\"input\":{...}}."
                .to_string(),
            "To obtain the list of available tools, call the special tool: {\"action\":\"call_tool\",\"tool\":\"list_tools\"}."
                .to_string(),
            "When you are ready to give the final answer to the user, respond with: {\"action\":\"final\",\"response\":\"...\"}."
                .to_string(),
            "Call one tool at a time and wait for its result before deciding the next step."
                .to_string(),
        ];

        if context.is_empty() {
            lines.push("No tools are currently available.".to_string());
            return lines.join(" ");
        }

        for guidance in &context.servers {
            lines.push(format!(
                "Server '{}' guidance: {}",
                guidance.name, guidance.instruction
            ));
        }

        if !context.tools.is_empty() {
            lines.push("Available tools:".to_string());
            for tool in &context.tools {
                let mut line = format!("- {}", tool.name);
                if let Some(description) = &tool.description {
                    line.push_str(&format!(": {}", description.trim()));
                }
                if let Some(schema) = &tool.input_schema {
                    let compact = serde_json::to_string(schema).unwrap_or_default();
                    line.push_str(&format!(". Input schema: {compact}"));
                }
                lines.push(line);
            }
        }

        lines.join("\n")
    }
}

pub(crate) fn tool_result_message(execution: &ToolExecution) -> String {
    json!({
        "tool_result": {
            "tool": execution.tool,
            "input": execution.input,
            "success": execution.success,
            "message": execution.message,
        },
        "instruction": TOOL_RESULT_INSTRUCTION,
    })
    .to_string()
}

pub(crate) fn correction_message(error: &impl std::fmt::Display) -> String {
    format!("{CORRECTION_INSTRUCTION}\n\nError details: {error}")
}
