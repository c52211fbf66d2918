use super::{build_client, NewsSource};
use crate::error::{BriefingError, Result};
use crate::news::catalog::{FeedCatalog, MAX_FEEDS_PER_CALL};
use crate::news::{AggregationRequest, Article};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;

/// Syndication feeds resolved through a [`FeedCatalog`].
pub struct RssSource {
    client: Client,
    catalog: FeedCatalog,
    max_feeds: usize,
}

impl RssSource {
    pub fn new(catalog: FeedCatalog, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            catalog,
            max_feeds: MAX_FEEDS_PER_CALL,
        })
    }

    async fn fetch_feed(&self, feed_url: &str, limit: usize) -> Result<Vec<Article>> {
        let response = self.client.get(feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BriefingError::unavailable(
                feed_url,
                format!("HTTP {}", status),
            ));
        }

        let content = response.bytes().await?;
        parse_feed(&content, feed_url, limit)
    }
}

#[async_trait]
impl NewsSource for RssSource {
    fn name(&self) -> &str {
        "RSS"
    }

    async fn try_fetch(&self, request: &AggregationRequest) -> Result<Vec<Article>> {
        let feeds = self.catalog.resolve(request.category, request.region);
        let feeds: Vec<&str> = feeds.into_iter().take(self.max_feeds).collect();
        if feeds.is_empty() {
            log::warn!("No RSS feeds configured for {} / {}", request.category, request.region);
            return Ok(Vec::new());
        }

        let results = join_all(
            feeds
                .iter()
                .map(|url| self.fetch_feed(url, request.max_articles)),
        )
        .await;

        let mut articles = Vec::new();
        let mut failures = 0;
        for (url, result) in feeds.iter().zip(results) {
            match result {
                Ok(mut batch) => {
                    log::debug!("RSS feed {} yielded {} entries", url, batch.len());
                    articles.append(&mut batch);
                }
                Err(e) => {
                    log::warn!("RSS feed error for {}: {}", url, e);
                    failures += 1;
                }
            }
        }

        if failures == feeds.len() {
            return Err(BriefingError::unavailable(
                "RSS",
                format!("all {} feeds failed", failures),
            ));
        }

        Ok(articles)
    }
}

/// Parse an RSS or Atom document into at most `limit` articles.
pub fn parse_feed(content: &[u8], feed_url: &str, limit: usize) -> Result<Vec<Article>> {
    let feed = feed_rs::parser::parse(content)
        .map_err(|e| BriefingError::parse(format!("feed {}", feed_url), e.to_string()))?;

    let source = feed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            url::Url::parse(feed_url)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.to_string()))
        })
        .unwrap_or_else(|| "RSS Source".to_string());

    let articles = feed
        .entries
        .into_iter()
        .take(limit)
        .map(|entry| {
            let content = entry.content.and_then(|c| c.body);
            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| content.clone());
            let published = entry.published.or(entry.updated);

            Article {
                title: entry.title.map(|t| t.content.trim().to_string()).unwrap_or_default(),
                description,
                url: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
                published_at: published.map(|dt| dt.to_rfc2822()).unwrap_or_default(),
                published,
                source: source.clone(),
                content,
            }
        })
        .collect();

    Ok(articles)
}
