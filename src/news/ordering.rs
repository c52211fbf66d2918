//! Recency ordering for articles whose timestamps arrive in mixed formats.
//!
//! RSS feeds publish RFC 2822 dates, NewsAPI publishes RFC 3339 and NewsData
//! uses `YYYY-MM-DD HH:MM:SS`. Sorting those as raw strings is not
//! chronological, so the default parses them first. `Lexical` keeps the raw
//! string comparison for callers that depend on it.

use super::Article;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampOrdering {
    /// Newest first by parsed instant; unparseable timestamps sort last
    #[default]
    Chronological,
    /// Descending comparison of the raw timestamp text
    Lexical,
}

impl FromStr for TimestampOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chronological" => Ok(Self::Chronological),
            "lexical" => Ok(Self::Lexical),
            other => Err(format!("expected 'chronological' or 'lexical', got '{}'", other)),
        }
    }
}

/// Best-effort parse of the timestamp formats the sources are known to use.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

impl TimestampOrdering {
    /// Sort newest first. The sort is stable, so equal keys keep source order.
    pub fn sort(&self, articles: &mut [Article]) {
        match self {
            TimestampOrdering::Chronological => articles.sort_by(|a, b| {
                let a_time = a.published.or_else(|| parse_timestamp(&a.published_at));
                let b_time = b.published.or_else(|| parse_timestamp(&b.published_at));
                match (a_time, b_time) {
                    (Some(a), Some(b)) => b.cmp(&a),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }),
            TimestampOrdering::Lexical => {
                articles.sort_by(|a, b| b.published_at.cmp(&a.published_at))
            }
        }
    }
}
