use super::Value;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AgentDirective {
    Final { response: String },
    CallTool { tool: String, input: Value },
}

/// Read the model's reply as a directive. Code fences and prose around the
/// JSON object are tolerated.
pub(crate) fn parse_agent_action(content: &str) -> Result<AgentDirective, String> {
    match extract_json(content) {
        Some(value) => parse_action_value(value),
        None => Err("expected JSON object in agent response".into()),
    }
}

fn parse_action_value(value: Value) -> Result<AgentDirective, String> {
    let map = match value {
        Value::Object(map) => map,
        Value::String(text) => return parse_agent_action(&text),
        other => return Err(format!("unsupported response type: {other}")),
    };

    let action = map
        .get("action")
        .and_then(Value::as_str)
        .ok_or("missing action field in agent response")?;

    match action {
        "call_tool" => {
            let tool = map
                .get("tool")
                .and_then(Value::as_str)
                .ok_or("call_tool action missing tool field")?;
            Ok(AgentDirective::CallTool {
                tool: tool.to_string(),
                input: map.get("input").cloned().unwrap_or(Value::Null),
            })
        }
        "final" => {
            let response = map
                .get("response")
                .and_then(Value::as_str)
                .ok_or("final action missing response field")?;
            Ok(AgentDirective::Final {
                response: response.to_string(),
            })
        }
        other => Err(format!("unknown action value: {other}")),
    }
}

fn extract_json(content: &str) -> Option<Value> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if trimmed.starts_with("```") {
        let stripped = trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```JSON")
            .trim_start_matches("```");
        if let Some(end) = stripped.rfind("```") {
            if let Ok(value) = serde_json::from_str::<Value>(stripped[..end].trim()) {
                return Some(value);
            }
        }
    }

    let (start, end) = (trimmed.find('{')?, trimmed.rfind('}')?);
    if start < end {
        serde_json::from_str::<Value>(&trimmed[start..=end]).ok()
    } else {
        None
    }
}
