use super::catalog::FeedCatalog;
use super::dedup::remove_duplicates;
use super::sources::{NewsApiSource, NewsDataSource, NewsSource, RssSource};
use super::{AggregationRequest, AggregationResult, AggregationStatus, TimestampOrdering};
use crate::config::NewsConfig;
use crate::error::Result;
use chrono::Utc;

/// Fallback-chained, deduplicating news fetcher.
///
/// Sources are consulted in priority order and only while the quota is
/// unmet, so a feed that already produced enough articles saves the API
/// calls behind it.
pub struct NewsAggregator {
    sources: Vec<Box<dyn NewsSource>>,
    ordering: TimestampOrdering,
}

impl NewsAggregator {
    pub fn new(sources: Vec<Box<dyn NewsSource>>, ordering: TimestampOrdering) -> Self {
        Self { sources, ordering }
    }

    /// RSS first, then NewsAPI and NewsData when their keys are configured.
    pub fn from_config(config: &NewsConfig) -> Result<Self> {
        let mut sources: Vec<Box<dyn NewsSource>> = vec![Box::new(RssSource::new(
            FeedCatalog::builtin(),
            config.timeout_seconds,
        )?)];

        if let Some(key) = &config.news_api_key {
            sources.push(Box::new(NewsApiSource::new(key, config.timeout_seconds)?));
        }
        if let Some(key) = &config.newsdata_api_key {
            sources.push(Box::new(NewsDataSource::new(key, config.timeout_seconds)?));
        }

        log::info!(
            "News aggregator initialized with sources: {}",
            sources.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self::new(sources, config.ordering))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn aggregate(&self, request: &AggregationRequest) -> AggregationResult {
        let wanted = request.max_articles;
        let mut collected = Vec::new();
        let mut sources_used = Vec::new();

        for source in &self.sources {
            if collected.len() >= wanted {
                break;
            }

            let quota = AggregationRequest {
                max_articles: wanted - collected.len(),
                ..*request
            };

            let mut batch: Vec<_> = source
                .fetch(&quota)
                .await
                .into_iter()
                .filter(|a| a.is_complete())
                .collect();

            if !batch.is_empty() {
                sources_used.push(source.name().to_string());
                collected.append(&mut batch);
            }
        }

        let mut articles = remove_duplicates(collected);
        self.ordering.sort(&mut articles);
        articles.truncate(wanted);

        log::info!(
            "Aggregated {} articles for {} / {} from [{}]",
            articles.len(),
            request.category,
            request.region,
            sources_used.join(", ")
        );

        AggregationResult {
            status: AggregationStatus::Success,
            total_results: articles.len(),
            articles,
            sources_used,
            timestamp: Utc::now(),
        }
    }
}
