mod context;
mod execution;
mod instructions;
mod parser;

use std::sync::Arc;

pub(super) use super::context::{ServerGuidance, ToolContext};
pub(super) use super::errors::ToolError;
pub(super) use crate::application::tooling::{ToolInvokeError, ToolSession};
pub(super) use serde_json::{Value, json};

pub(crate) use execution::ToolExecution;
pub(crate) use instructions::{correction_message, tool_result_message};
pub(crate) use parser::{AgentDirective, parse_agent_action};

pub struct ToolRuntime {
    session: Arc<dyn ToolSession>,
}

impl ToolRuntime {
    pub fn new(session: Arc<dyn ToolSession>) -> Self {
        Self { session }
    }
}
