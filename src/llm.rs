use crate::config::ClaudeConfig;
use crate::error::{BriefingError, Result};
use crate::utils::{ExchangeRecord, TranscriptStore};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

tokio::task_local! {
    /// Identifier of the briefing run the current task belongs to
    pub static RUN_ID: String;
}

/// Run id of the enclosing briefing, or `adhoc` outside of one.
pub fn current_run_id() -> String {
    RUN_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "adhoc".to_string())
}

/// A single-turn completion request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Who is asking, used for logs and transcripts
    pub caller: String,
    pub system: Option<String>,
    pub prompt: String,
}

impl LlmRequest {
    pub fn new(caller: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            system: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Text-in, text-out language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn complete(&self, request: &LlmRequest) -> Result<String>;
}

/// Claude Messages API client
pub struct ClaudeClient {
    config: ClaudeConfig,
    client: Client,
    transcripts: TranscriptStore,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig, transcripts: TranscriptStore) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            config,
            client,
            transcripts,
        })
    }

    fn payload(&self, request: &LlmRequest) -> Value {
        let mut payload = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [{
                "role": "user",
                "content": request.prompt
            }]
        });
        if let Some(system) = &request.system {
            payload["system"] = json!(system);
        }
        payload
    }

    async fn send(&self, request: &LlmRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&self.payload(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BriefingError::Llm(format!(
                "Claude API error ({}): {}",
                status, error_text
            )));
        }

        let claude_response: Value = response.json().await?;
        extract_text(&claude_response)
    }
}

#[async_trait]
impl LanguageModel for ClaudeClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        log::debug!("{} calling Claude API ({} chars)", request.caller, request.prompt.len());

        let result = self.send(request).await;

        if self.transcripts.is_enabled() {
            let run_id = current_run_id();
            self.transcripts.record(&ExchangeRecord {
                run_id: &run_id,
                caller: &request.caller,
                model: &self.config.model,
                prompt: &request.prompt,
                reply: result.as_ref().ok().map(|s| s.as_str()),
                error: result.as_ref().err().map(|e| e.to_string()),
                timestamp: chrono::Utc::now().to_rfc3339(),
            });
        }

        result
    }
}

/// Concatenate the text blocks of a Messages API response.
pub fn extract_text(response: &Value) -> Result<String> {
    let blocks = response
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| BriefingError::Llm("response has no content blocks".to_string()))?;

    let text: Vec<&str> = blocks
        .iter()
        .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
        .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
        .collect();

    let text = text.join("\n");
    if text.trim().is_empty() {
        return Err(BriefingError::Llm("response contained no text".to_string()));
    }
    Ok(text)
}
