use crate::news::{AggregationRequest, Category, NewsAggregator, Region};
use crate::tool::Tool;
use anyhow::Result;
use std::sync::Arc;

/// Exposes the news aggregator as a tool
pub struct NewsTool {
    aggregator: Arc<NewsAggregator>,
}

#[derive(serde::Deserialize)]
struct NewsParams {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    max_articles: Option<usize>,
}

impl NewsTool {
    pub fn new(aggregator: Arc<NewsAggregator>) -> Self {
        Self { aggregator }
    }
}

#[async_trait::async_trait]
impl Tool for NewsTool {
    fn name(&self) -> &str {
        "news_aggregator"
    }

    fn description(&self) -> &str {
        "Collects recent articles for a category and country from RSS feeds and news APIs"
    }

    async fn execute(&self, arguments: &str) -> Result<String> {
        let params: NewsParams = serde_json::from_str(arguments)?;

        let request = AggregationRequest::new(
            params
                .category
                .as_deref()
                .map(Category::from_loose)
                .unwrap_or(Category::General),
            Region::from_country_code(params.country.as_deref().unwrap_or("us")),
            params.max_articles.unwrap_or(5),
        );

        let result = self.aggregator.aggregate(&request).await;
        Ok(serde_json::to_string(&result)?)
    }
}
