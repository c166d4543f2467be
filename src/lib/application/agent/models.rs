use crate::config::AgentSettings;
use crate::config::defaults::{DEFAULT_MAX_STEPS, DEFAULT_MODEL};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub tool: String,
    pub input: Value,
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub session_id: String,
    pub response: String,
    pub steps: Vec<AgentStep>,
    /// The model was still calling tools when `max_steps` ran out.
    pub hit_step_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOptions {
    pub model: String,
    pub max_steps: usize,
    pub verbose: bool,
}

impl AgentOptions {
    pub fn new(model: impl Into<String>, settings: &AgentSettings) -> Self {
        Self {
            model: model.into(),
            max_steps: settings.max_steps,
            verbose: settings.verbose,
        }
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
            verbose: false,
        }
    }
}

pub(crate) fn step_limit_response(max_steps: usize) -> String {
    format!("Agent stopped after reaching the maximum number of steps ({max_steps}).")
}
