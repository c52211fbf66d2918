use super::{Category, Region};
use std::collections::BTreeMap;

/// Upper bound on feeds fetched in a single aggregation call
pub const MAX_FEEDS_PER_CALL: usize = 3;

/// RSS feed URLs keyed by category, then region.
#[derive(Debug, Clone, Default)]
pub struct FeedCatalog {
    feeds: BTreeMap<Category, BTreeMap<Region, Vec<String>>>,
}

impl FeedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in set of public feeds
    pub fn builtin() -> Self {
        Self::new()
            .with_feeds(
                Category::General,
                Region::Global,
                &[
                    "https://feeds.bbci.co.uk/news/rss.xml",
                    "https://rss.cnn.com/rss/edition.rss",
                    "https://feeds.reuters.com/reuters/topNews",
                    "https://feeds.nbcnews.com/nbcnews/public/news",
                ],
            )
            .with_feeds(
                Category::General,
                Region::India,
                &[
                    "https://feeds.feedburner.com/ndtvnews-top-stories",
                    "https://timesofindia.indiatimes.com/rssfeedstopstories.cms",
                    "https://www.thehindu.com/news/national/?service=rss",
                    "https://indianexpress.com/feed/",
                ],
            )
            .with_feeds(
                Category::General,
                Region::Us,
                &[
                    "https://feeds.washingtonpost.com/rss/national",
                    "https://rss.nytimes.com/services/xml/rss/nyt/US.xml",
                ],
            )
            .with_feeds(
                Category::Technology,
                Region::Global,
                &[
                    "https://feeds.feedburner.com/TechCrunch",
                    "https://feeds.arstechnica.com/arstechnica/index",
                    "https://www.wired.com/feed/rss",
                    "https://feeds.reuters.com/reuters/technologyNews",
                ],
            )
            .with_feeds(
                Category::Technology,
                Region::India,
                &["https://economictimes.indiatimes.com/tech/rssfeeds/13357270.cms"],
            )
            .with_feeds(
                Category::Business,
                Region::Global,
                &[
                    "https://feeds.reuters.com/reuters/businessNews",
                    "https://feeds.bloomberg.com/markets/news.rss",
                    "https://feeds.cnbc.com/cnbc/news",
                ],
            )
            .with_feeds(
                Category::Business,
                Region::India,
                &[
                    "https://economictimes.indiatimes.com/rssfeedstopstories.cms",
                    "https://www.business-standard.com/rss/home_page_top_stories.rss",
                ],
            )
    }

    pub fn with_feeds(mut self, category: Category, region: Region, urls: &[&str]) -> Self {
        self.feeds
            .entry(category)
            .or_default()
            .entry(region)
            .or_default()
            .extend(urls.iter().map(|u| u.to_string()));
        self
    }

    fn lookup(&self, category: Category, region: Region) -> Option<&[String]> {
        self.feeds
            .get(&category)
            .and_then(|regions| regions.get(&region))
            .map(|urls| urls.as_slice())
            .filter(|urls| !urls.is_empty())
    }

    /// Feeds for a request, falling back to general news for the region and
    /// then to general global news. Returns an empty list only when even the
    /// global set is missing.
    pub fn resolve(&self, category: Category, region: Region) -> Vec<&str> {
        let chosen = self
            .lookup(category, region)
            .or_else(|| self.lookup(Category::General, region))
            .or_else(|| self.lookup(Category::General, Region::Global))
            .unwrap_or(&[]);

        chosen.iter().map(|u| u.as_str()).collect()
    }
}
