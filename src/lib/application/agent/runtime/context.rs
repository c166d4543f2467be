use super::{ServerGuidance, ToolContext, ToolRuntime};

impl ToolRuntime {
    pub async fn build_context(&self) -> ToolContext {
        let servers = self
            .session
            .instructions()
            .await
            .into_iter()
            .filter(|(_, instruction)| !instruction.trim().is_empty())
            .map(|(name, instruction)| ServerGuidance { name, instruction })
            .collect();

        ToolContext {
            servers,
            tools: self.session.list_tools().await,
        }
    }
}
