use super::{build_client, check_status, require_key, NewsSource};
use crate::error::Result;
use crate::news::ordering::parse_timestamp;
use crate::news::{AggregationRequest, Article, Category, Region};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const REMOVED_MARKER: &str = "[Removed]";
const SEARCH_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Deserialize)]
pub(crate) struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<NewsApiSourceRef>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceRef {
    name: Option<String>,
}

/// Primary REST source: top headlines, with keyword search as a fallback.
pub struct NewsApiSource {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiSource {
    pub fn new(api_key: &str, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            api_key: require_key("NewsAPI", api_key)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn top_headlines(&self, request: &AggregationRequest) -> Result<Vec<Article>> {
        let page_size = request.max_articles.to_string();
        let mut params = vec![
            ("apiKey", self.api_key.as_str()),
            ("country", request.region.country_code()),
            ("pageSize", page_size.as_str()),
        ];
        if request.category != Category::General {
            params.push(("category", request.category.as_str()));
        }

        self.get("top-headlines", &params).await
    }

    async fn search(&self, request: &AggregationRequest) -> Result<Vec<Article>> {
        let query = search_query(request.category, request.region);
        let from = (Utc::now() - Duration::days(SEARCH_WINDOW_DAYS))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = request.max_articles.to_string();
        let params = [
            ("apiKey", self.api_key.as_str()),
            ("q", query.as_str()),
            ("from", from.as_str()),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", page_size.as_str()),
        ];

        self.get("everything", &params).await
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<Article>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(params).send().await?;
        check_status(self.name(), response.status())?;

        let body: NewsApiResponse = response.json().await?;
        Ok(normalize(body))
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn try_fetch(&self, request: &AggregationRequest) -> Result<Vec<Article>> {
        let headlines = self.top_headlines(request).await?;
        if !headlines.is_empty() {
            return Ok(headlines);
        }

        log::info!(
            "NewsAPI had no headlines for {} / {}, trying keyword search",
            request.category,
            request.region
        );
        self.search(request).await
    }
}

/// OR-joined keyword query biased towards the category and region.
pub(crate) fn search_query(category: Category, region: Region) -> String {
    let mut terms = vec![category.as_str(), "latest"];
    terms.extend_from_slice(region.search_terms());
    terms.join(" OR ")
}

/// Keep only articles with a real title and description.
pub(crate) fn normalize(body: NewsApiResponse) -> Vec<Article> {
    body.articles
        .into_iter()
        .filter_map(|raw| {
            let title = raw.title.filter(|t| !t.trim().is_empty() && !t.contains(REMOVED_MARKER))?;
            let description = raw
                .description
                .filter(|d| !d.trim().is_empty() && !d.contains(REMOVED_MARKER))?;
            let published_at = raw.published_at.unwrap_or_default();

            Some(Article {
                title,
                description: Some(description),
                url: raw.url.unwrap_or_default(),
                published: parse_timestamp(&published_at),
                published_at,
                source: raw
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "NewsAPI".to_string()),
                content: raw.content,
            })
        })
        .collect()
}
