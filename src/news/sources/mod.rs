pub mod newsapi;
pub mod newsdata;
pub mod rss;

pub use newsapi::NewsApiSource;
pub use newsdata::NewsDataSource;
pub use rss::RssSource;

use super::{AggregationRequest, Article};
use crate::error::{BriefingError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// A place articles come from (RSS feeds, a REST API, ...).
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Source family name reported in `sources_used`
    fn name(&self) -> &str;

    /// Fetch with failures swallowed: any error becomes an empty list.
    async fn fetch(&self, request: &AggregationRequest) -> Vec<Article> {
        log::debug!(
            "Source fetch start: {} - {} / {} / {}",
            self.name(),
            request.category,
            request.region,
            request.max_articles
        );

        match self.try_fetch(request).await {
            Ok(articles) => {
                log::info!("Source {} returned {} articles", self.name(), articles.len());
                articles
            }
            Err(e) => {
                log::warn!("Source {} failed, continuing without it: {}", self.name(), e);
                Vec::new()
            }
        }
    }

    /// Actual fetch implementation
    async fn try_fetch(&self, request: &AggregationRequest) -> Result<Vec<Article>>;
}

pub(crate) fn build_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("daily-briefing/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(BriefingError::from)
}

/// Map the status codes the news APIs document onto source errors.
pub(crate) fn check_status(name: &str, status: StatusCode) -> Result<()> {
    match status.as_u16() {
        200 => Ok(()),
        401 => Err(BriefingError::unavailable(name, "invalid API key")),
        426 | 429 => Err(BriefingError::unavailable(name, "API rate limit exceeded")),
        code => Err(BriefingError::unavailable(
            name,
            format!("API request failed with status {}", code),
        )),
    }
}

pub(crate) fn require_key(name: &str, key: &str) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(BriefingError::Configuration(format!("{} API key is empty", name)));
    }
    Ok(key.to_string())
}
