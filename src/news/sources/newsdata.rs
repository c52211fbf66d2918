use super::{build_client, check_status, require_key, NewsSource};
use crate::error::{BriefingError, Result};
use crate::news::ordering::parse_timestamp;
use crate::news::{AggregationRequest, Article};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_URL: &str = "https://newsdata.io/api/1/news";

#[derive(Debug, Deserialize)]
pub(crate) struct NewsDataResponse {
    status: Option<String>,
    #[serde(default)]
    results: Vec<NewsDataArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsDataArticle {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
    content: Option<String>,
}

/// Secondary REST source (newsdata.io).
pub struct NewsDataSource {
    client: Client,
    api_key: String,
    url: String,
}

impl NewsDataSource {
    pub fn new(api_key: &str, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            api_key: require_key("NewsData", api_key)?,
            url: DEFAULT_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl NewsSource for NewsDataSource {
    fn name(&self) -> &str {
        "NewsData"
    }

    async fn try_fetch(&self, request: &AggregationRequest) -> Result<Vec<Article>> {
        let size = request.max_articles.to_string();
        let params = [
            ("apikey", self.api_key.as_str()),
            ("country", request.region.country_code()),
            ("category", request.category.as_str()),
            ("language", "en"),
            ("size", size.as_str()),
        ];

        let response = self.client.get(&self.url).query(&params).send().await?;
        check_status(self.name(), response.status())?;

        let body: NewsDataResponse = response.json().await?;
        normalize(body)
    }
}

pub(crate) fn normalize(body: NewsDataResponse) -> Result<Vec<Article>> {
    if let Some(status) = body.status.as_deref() {
        if status != "success" {
            return Err(BriefingError::unavailable("NewsData", format!("status {}", status)));
        }
    }

    Ok(body
        .results
        .into_iter()
        .map(|raw| {
            let published_at = raw.pub_date.unwrap_or_default();
            Article {
                title: raw.title.unwrap_or_default(),
                description: raw.description,
                url: raw.link.unwrap_or_default(),
                published: parse_timestamp(&published_at),
                published_at,
                source: raw.source_id.unwrap_or_else(|| "NewsData".to_string()),
                content: raw.content,
            }
        })
        .collect())
}
