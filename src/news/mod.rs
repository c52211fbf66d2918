pub mod aggregator;
pub mod catalog;
pub mod dedup;
pub mod ordering;
pub mod sources;

pub use aggregator::NewsAggregator;
pub use catalog::FeedCatalog;
pub use ordering::TimestampOrdering;
pub use sources::NewsSource;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hard cap on articles per aggregation call
pub const MAX_ARTICLES: usize = 10;

/// A news item normalized from any source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// Timestamp text exactly as the source supplied it
    pub published_at: String,
    /// Parsed form of `published_at`, used only for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Article {
    /// Articles without a title or description are never shown.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && self
                .description
                .as_deref()
                .map(|d| !d.trim().is_empty())
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Technology,
    Business,
    Health,
    Sports,
    Entertainment,
    Science,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Health => "health",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Science => "science",
        }
    }

    /// Lenient parse used on model output; anything unknown is `General`.
    pub fn from_loose(value: &str) -> Self {
        value.parse().unwrap_or(Category::General)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" | "top" | "headlines" => Ok(Category::General),
            "technology" | "tech" => Ok(Category::Technology),
            "business" | "finance" | "markets" => Ok(Category::Business),
            "health" => Ok(Category::Health),
            "sports" | "sport" => Ok(Category::Sports),
            "entertainment" => Ok(Category::Entertainment),
            "science" => Ok(Category::Science),
            other => Err(format!("unknown news category: {}", other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    India,
    Us,
    Uk,
    Global,
}

impl Region {
    pub fn from_country_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "in" | "india" => Region::India,
            "us" | "usa" => Region::Us,
            "gb" | "uk" => Region::Uk,
            _ => Region::Global,
        }
    }

    /// Country code sent to the REST APIs. Global requests use the US edition.
    pub fn country_code(&self) -> &'static str {
        match self {
            Region::India => "in",
            Region::Us => "us",
            Region::Uk => "gb",
            Region::Global => "us",
        }
    }

    /// Extra search terms that bias keyword search towards the region
    pub fn search_terms(&self) -> &'static [&'static str] {
        match self {
            Region::India => &["India", "Indian"],
            Region::Us => &["America", "American"],
            Region::Uk => &["Britain", "British"],
            Region::Global => &[],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::India => "india",
            Region::Us => "us",
            Region::Uk => "uk",
            Region::Global => "global",
        };
        f.write_str(name)
    }
}

/// What to aggregate. The count is clamped to `1..=MAX_ARTICLES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub category: Category,
    pub region: Region,
    pub max_articles: usize,
}

impl AggregationRequest {
    pub fn new(category: Category, region: Region, max_articles: usize) -> Self {
        Self {
            category,
            region,
            max_articles: max_articles.clamp(1, MAX_ARTICLES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStatus {
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResult {
    pub status: AggregationStatus,
    pub total_results: usize,
    pub articles: Vec<Article>,
    pub sources_used: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
