use anyhow::Result;

/// Data-fetching capability invoked by agents with JSON arguments.
/// Tools answer with JSON text so the result can be logged or stored as is
/// and decoded by the calling agent.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of the tool
    fn name(&self) -> &str;

    /// Get the description of the tool
    fn description(&self) -> &str;

    /// Entry point for tool execution with logging
    async fn call(&self, arguments: &str) -> Result<String> {
        log::info!("Tool call start: {} - args: {}", self.name(), arguments);

        let result = self.execute(arguments).await;

        match &result {
            Ok(response) => log::debug!("Tool call success: {} - response: {}", self.name(), response),
            Err(e) => log::error!("Tool call error: {} - error: {}", self.name(), e),
        }

        result
    }

    /// Actual implementation of the tool execution
    async fn execute(&self, arguments: &str) -> Result<String>;
}
