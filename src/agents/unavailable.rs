use crate::agent::Agent;
use anyhow::Result;

/// Stands in for an agent whose provider is not configured.
/// Every call fails with the configuration reason, so the orchestrator
/// substitutes the fallback text and reports the service as unavailable.
pub struct UnavailableAgent {
    name: String,
    reason: String,
    fallback: String,
}

impl UnavailableAgent {
    pub fn new(name: &str, reason: impl Into<String>, fallback: &str) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.into(),
            fallback: fallback.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Agent for UnavailableAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Placeholder for an agent whose provider is not configured"
    }

    fn fallback_message(&self) -> &str {
        &self.fallback
    }

    async fn execute(&self, _task: &str) -> Result<String> {
        Err(anyhow::anyhow!("{} is not configured: {}", self.name, self.reason))
    }
}
