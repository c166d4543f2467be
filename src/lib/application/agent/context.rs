use crate::application::tooling::ServerToolInfo;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ServerGuidance {
    pub name: String,
    pub instruction: String,
}

/// What the model is told about the connected tool servers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerGuidance>,
    pub tools: Vec<ServerToolInfo>,
}

impl ToolContext {
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty() && self.tools.is_empty()
    }
}
