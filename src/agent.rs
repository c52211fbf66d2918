use anyhow::Result;

/// Core trait that all briefing agents implement.
/// Sub-agents pair one data fetch with prose generation; the orchestrator
/// delegates to sub-agents and synthesizes their answers.
#[async_trait::async_trait]
pub trait Agent: Send + Sync {
    /// Get the name of the agent
    fn name(&self) -> &str;

    /// Get the description of what this agent handles
    fn description(&self) -> &str;

    /// Text used in place of this agent's answer when it fails or times out
    fn fallback_message(&self) -> &str;

    /// Entry point for agent execution with logging
    async fn call(&self, task: &str) -> Result<String> {
        log::info!("Agent call start: {} - task: {}", self.name(), task);

        let result = self.execute(task).await;

        match &result {
            Ok(response) => log::info!(
                "Agent call success: {} - {} chars",
                self.name(),
                response.len()
            ),
            Err(e) => log::error!("Agent call error: {} - error: {}", self.name(), e),
        }

        result
    }

    /// Actual implementation of the agent execution
    async fn execute(&self, task: &str) -> Result<String>;
}
