use crate::agent::Agent;
use crate::agents::news::{NewsAgent, NewsTool};
use crate::agents::weather::{WeatherAgent, WeatherTool, WEATHER_FALLBACK};
use crate::agents::UnavailableAgent;
use crate::config::{AppConfig, OrchestratorSettings};
use crate::error::{BriefingError, Result};
use crate::llm::{ClaudeClient, LanguageModel, LlmRequest, RUN_ID};
use crate::news::NewsAggregator;
use crate::utils::TranscriptStore;
use std::sync::Arc;
use tokio::time::timeout;

mod classification;
pub mod prompts;
mod state;

pub use classification::Classification;
pub use state::{BriefingRun, BriefingStage};

/// Sub-agent answer, or its fallback text when it failed
struct Delegation {
    text: String,
    failed: bool,
}

/// Master agent: classify the request, delegate to the weather and news
/// agents concurrently, then synthesize one briefing from their answers.
pub struct OrchestratorAgent {
    model: Arc<dyn LanguageModel>,
    weather: Box<dyn Agent>,
    news: Box<dyn Agent>,
    settings: OrchestratorSettings,
}

impl OrchestratorAgent {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let transcripts = TranscriptStore::new(config.transcript_dir.clone());
        let model: Arc<dyn LanguageModel> =
            Arc::new(ClaudeClient::new(config.claude.clone(), transcripts)?);

        let aggregator = Arc::new(NewsAggregator::from_config(&config.news)?);
        log::info!("News sources: {}", aggregator.source_names().join(", "));

        let news = NewsAgent::new(model.clone(), Box::new(NewsTool::new(aggregator)));
        let weather: Box<dyn Agent> = match WeatherTool::new(&config.weather) {
            Ok(tool) => Box::new(WeatherAgent::new(model.clone(), Box::new(tool), &config.weather)),
            Err(BriefingError::Configuration(reason)) => {
                log::warn!("Weather agent disabled: {}", reason);
                Box::new(UnavailableAgent::new("weather_agent", reason, WEATHER_FALLBACK))
            }
            Err(e) => return Err(e),
        };

        log::info!("Orchestrator initialized with model {}", model.model_name());
        Ok(Self::with_agents(
            model,
            weather,
            Box::new(news),
            config.orchestrator.clone(),
        ))
    }

    pub fn with_agents(
        model: Arc<dyn LanguageModel>,
        weather: Box<dyn Agent>,
        news: Box<dyn Agent>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            model,
            weather,
            news,
            settings,
        }
    }

    pub fn weather_agent(&self) -> &dyn Agent {
        self.weather.as_ref()
    }

    pub fn news_agent(&self) -> &dyn Agent {
        self.news.as_ref()
    }

    pub async fn classify(&self, request: &str) -> Result<Classification> {
        let llm_request = LlmRequest::new(self.name(), prompts::classification_prompt(request))
            .with_system(prompts::SYSTEM);
        let reply = self.model.complete(&llm_request).await?;
        let classification = Classification::from_reply(&reply);

        log::info!(
            "Classification: weather={} location={:?} news={} categories={:?}",
            classification.needs_weather,
            classification.location,
            classification.needs_news,
            classification.news_categories
        );
        if let Some(explanation) = &classification.explanation {
            log::debug!("Delegation reasoning: {}", explanation);
        }
        Ok(classification)
    }

    async fn delegate(&self, agent: &dyn Agent, task: Option<String>) -> Option<Delegation> {
        let task = task?;

        match timeout(self.settings.agent_timeout, agent.call(&task)).await {
            Ok(Ok(text)) => return Some(Delegation { text, failed: false }),
            Ok(Err(e)) => log::error!("{} failed: {}", agent.name(), e),
            Err(_) => log::warn!(
                "{} timed out after {:?}",
                agent.name(),
                self.settings.agent_timeout
            ),
        }

        Some(Delegation {
            text: format!("Notice: {}", agent.fallback_message()),
            failed: true,
        })
    }

    async fn synthesize(&self, combined: &str, degraded: bool) -> Result<String> {
        let llm_request = LlmRequest::new(self.name(), prompts::synthesis_prompt(combined, degraded))
            .with_system(prompts::SYSTEM);
        let text = self.model.complete(&llm_request).await?;

        let missing = prompts::missing_sections(&text);
        if !missing.is_empty() {
            log::warn!("Synthesized briefing is missing sections: {:?}", missing);
        }
        Ok(text)
    }

    async fn run_pipeline(&self, request: &str, run: &mut BriefingRun) -> Result<String> {
        log::info!("[{}] Briefing request: {}", run.run_id(), request);

        let classification = self.classify(request).await?;
        run.advance(BriefingStage::Classified)?;

        if !classification.needs_anything() {
            run.advance(BriefingStage::Done)?;
            return Ok(prompts::CLARIFICATION.to_string());
        }

        run.advance(BriefingStage::Delegating)?;
        let weather_task = classification
            .needs_weather
            .then(|| classification.weather_request());
        let news_task = classification.needs_news.then(|| classification.news_request());

        let (weather, news) = tokio::join!(
            self.delegate(self.weather.as_ref(), weather_task),
            self.delegate(self.news.as_ref(), news_task),
        );

        let mut blocks = Vec::new();
        let mut failed = Vec::new();
        if let Some(weather) = weather {
            if weather.failed {
                failed.push("Weather");
            }
            blocks.push(prompts::weather_block(&weather.text));
        }
        if let Some(news) = news {
            if news.failed {
                failed.push("News");
            }
            blocks.push(prompts::news_block(&news.text));
        }

        let mut combined = blocks.join("\n\n");
        if !failed.is_empty() {
            combined.push_str("\n\n");
            combined.push_str(&prompts::service_status_note(&failed));
        }

        run.advance(BriefingStage::Synthesizing)?;
        match self.synthesize(&combined, !failed.is_empty()).await {
            Ok(text) => {
                run.advance(BriefingStage::Done)?;
                Ok(text)
            }
            Err(e) => {
                run.fail("synthesis");
                Err(BriefingError::SynthesisFailure(e.to_string()))
            }
        }
    }

    /// One pass through the pipeline; any error becomes an apology.
    pub async fn process_request(&self, request: &str) -> String {
        let run_id = new_run_id();
        RUN_ID
            .scope(run_id.clone(), async {
                let mut run = BriefingRun::new(run_id.as_str());
                match self.run_pipeline(request, &mut run).await {
                    Ok(text) => text,
                    Err(e) => {
                        run.fail(&e.to_string());
                        log::error!("[{}] Briefing failed: {}", run_id, e);
                        prompts::apology(&apology_detail(&e))
                    }
                }
            })
            .await
    }

    /// Pipeline under the retry policy and the per-attempt timeout.
    pub async fn run_with_recovery(&self, request: &str) -> String {
        let run_id = new_run_id();
        RUN_ID
            .scope(run_id.clone(), self.recover(request, &run_id))
            .await
    }

    async fn recover(&self, request: &str, run_id: &str) -> String {
        let policy = &self.settings.retry;
        let mut attempt = 0;

        loop {
            let mut run = BriefingRun::new(run_id);
            let outcome = match timeout(
                self.settings.pipeline_timeout,
                self.run_pipeline(request, &mut run),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(BriefingError::PipelineTimeout(self.settings.pipeline_timeout)),
            };

            let error = match outcome {
                Ok(text) => return text,
                Err(BriefingError::SynthesisFailure(message)) => {
                    log::error!("[{}] Synthesis failed: {}", run_id, message);
                    return prompts::apology(&message);
                }
                Err(e) => e,
            };
            run.fail(&error.to_string());

            if policy.has_attempt_after(attempt) {
                let delay = policy.delay_for_attempt(attempt);
                log::warn!(
                    "[{}] Attempt {}/{} failed: {}. Retrying in {:?}",
                    run_id,
                    attempt + 1,
                    policy.max_attempts,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            log::error!(
                "[{}] All {} attempts failed, last error: {}",
                run_id,
                policy.max_attempts,
                error
            );
            return if error.is_timeout() {
                prompts::timeout_fallback(request)
            } else {
                prompts::error_fallback(request)
            };
        }
    }
}

fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The raw message for synthesis failures, the full error otherwise
fn apology_detail(error: &BriefingError) -> String {
    match error {
        BriefingError::SynthesisFailure(message) => message.clone(),
        other => other.to_string(),
    }
}

#[async_trait::async_trait]
impl Agent for OrchestratorAgent {
    fn name(&self) -> &str {
        "orchestrator"
    }

    fn description(&self) -> &str {
        "Builds a daily briefing from the weather and news agents"
    }

    fn fallback_message(&self) -> &str {
        "Daily briefing service temporarily unavailable. Please try again later."
    }

    async fn execute(&self, task: &str) -> anyhow::Result<String> {
        Ok(self.run_with_recovery(task).await)
    }
}
