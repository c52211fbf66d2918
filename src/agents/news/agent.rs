use super::prompts;
use super::query::NewsQuery;
use crate::agent::Agent;
use crate::llm::{LanguageModel, LlmRequest};
use crate::news::AggregationResult;
use crate::tool::Tool;
use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;

pub const NO_ARTICLES: &str = "No recent news articles found for your request.";

/// Answers news requests: extract a query, aggregate articles, write prose.
pub struct NewsAgent {
    model: Arc<dyn LanguageModel>,
    tool: Box<dyn Tool>,
}

impl NewsAgent {
    pub fn new(model: Arc<dyn LanguageModel>, tool: Box<dyn Tool>) -> Self {
        Self { model, tool }
    }

    /// Ask the model for the query parameters. A failed call yields the defaults.
    pub async fn analyze(&self, request: &str) -> NewsQuery {
        let llm_request = LlmRequest::new(self.name(), prompts::analysis_prompt(request))
            .with_system(prompts::SYSTEM);

        match self.model.complete(&llm_request).await {
            Ok(reply) => NewsQuery::from_reply(&reply),
            Err(e) => {
                log::warn!("News request analysis failed, using defaults: {}", e);
                NewsQuery::default()
            }
        }
    }

    /// Query extraction plus aggregation, without the prose step
    pub async fn fetch_articles(&self, request: &str) -> Result<(NewsQuery, AggregationResult)> {
        let query = self.analyze(request).await;
        log::info!(
            "News query: category={} country={} count={} keywords={:?}",
            query.category,
            query.country,
            query.count,
            query.keywords
        );

        let arguments = json!({
            "category": query.category.as_str(),
            "country": query.country,
            "max_articles": query.count,
        });

        let raw = self.tool.call(&arguments.to_string()).await?;
        let result: AggregationResult =
            serde_json::from_str(&raw).context("Malformed news aggregation result")?;

        Ok((query, result))
    }

    async fn briefing(&self, request: &str) -> Result<String> {
        let (_, result) = self.fetch_articles(request).await?;

        if result.articles.is_empty() {
            return Ok(NO_ARTICLES.to_string());
        }

        let llm_request = LlmRequest::new(self.name(), prompts::briefing_prompt(request, &result))
            .with_system(prompts::SYSTEM);
        Ok(self.model.complete(&llm_request).await?)
    }
}

#[async_trait::async_trait]
impl Agent for NewsAgent {
    fn name(&self) -> &str {
        "news_agent"
    }

    fn description(&self) -> &str {
        "Finds recent news for a category and country and writes a short briefing"
    }

    fn fallback_message(&self) -> &str {
        "News updates temporarily unavailable. Please try again later."
    }

    async fn execute(&self, task: &str) -> Result<String> {
        match self.briefing(task).await {
            Ok(text) => Ok(text),
            Err(e) => {
                log::error!("News agent failed: {:#}", e);
                Ok(format!(
                    "I encountered an error processing your news request: {}",
                    e
                ))
            }
        }
    }
}
