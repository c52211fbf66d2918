use super::prompts;
use super::query::WeatherQuery;
use crate::agent::Agent;
use crate::config::WeatherConfig;
use crate::llm::{LanguageModel, LlmRequest};
use crate::tool::Tool;
use crate::weather::{Units, WeatherReport};
use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;

pub const WEATHER_FALLBACK: &str =
    "Weather information temporarily unavailable. Please try again later.";

/// Answers weather requests: extract a location, fetch conditions, write prose.
pub struct WeatherAgent {
    model: Arc<dyn LanguageModel>,
    tool: Box<dyn Tool>,
    default_location: String,
    default_units: Units,
}

impl WeatherAgent {
    pub fn new(model: Arc<dyn LanguageModel>, tool: Box<dyn Tool>, config: &WeatherConfig) -> Self {
        Self {
            model,
            tool,
            default_location: config.default_location.clone(),
            default_units: config.units,
        }
    }

    pub async fn analyze(&self, request: &str) -> WeatherQuery {
        let llm_request = LlmRequest::new(self.name(), prompts::analysis_prompt(request))
            .with_system(prompts::SYSTEM);

        match self.model.complete(&llm_request).await {
            Ok(reply) => WeatherQuery::from_reply(&reply, &self.default_location, self.default_units),
            Err(e) => {
                log::warn!("Weather request analysis failed, using defaults: {}", e);
                WeatherQuery {
                    location: self.default_location.clone(),
                    units: self.default_units,
                }
            }
        }
    }

    pub async fn fetch_report(&self, request: &str) -> Result<WeatherReport> {
        let query = self.analyze(request).await;
        log::info!("Weather query: location={} units={}", query.location, query.units);

        let arguments = json!({
            "location": query.location,
            "units": query.units,
        });
        let raw = self.tool.call(&arguments.to_string()).await?;
        serde_json::from_str(&raw).context("Malformed weather report")
    }

    async fn report(&self, request: &str) -> Result<String> {
        let report = self.fetch_report(request).await?;
        let llm_request = LlmRequest::new(self.name(), prompts::report_prompt(request, &report))
            .with_system(prompts::SYSTEM);
        Ok(self.model.complete(&llm_request).await?)
    }
}

#[async_trait::async_trait]
impl Agent for WeatherAgent {
    fn name(&self) -> &str {
        "weather_agent"
    }

    fn description(&self) -> &str {
        "Reports current weather conditions for a location"
    }

    fn fallback_message(&self) -> &str {
        WEATHER_FALLBACK
    }

    async fn execute(&self, task: &str) -> Result<String> {
        match self.report(task).await {
            Ok(text) => Ok(text),
            Err(e) => {
                log::error!("Weather agent failed: {:#}", e);
                Ok(format!(
                    "I encountered an error getting weather information: {}",
                    e
                ))
            }
        }
    }
}
