use crate::error::BriefingError;
use crate::extract::{or_default, TaggedFields};
use crate::news::{Category, Region, MAX_ARTICLES};

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_COUNT: usize = 5;

/// Parameters the model extracted from a news request
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub category: Category,
    pub country: String,
    pub count: usize,
    pub keywords: Option<String>,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            category: Category::General,
            country: DEFAULT_COUNTRY.to_string(),
            count: DEFAULT_COUNT,
            keywords: None,
        }
    }
}

impl NewsQuery {
    pub const KEYS: [&'static str; 4] = ["CATEGORY", "COUNTRY", "COUNT", "KEYWORDS"];

    /// Field-by-field parse; anything missing or malformed takes its default.
    pub fn from_reply(reply: &str) -> Self {
        let fields = TaggedFields::parse(reply);
        let missing = fields.missing(&Self::KEYS);
        if !missing.is_empty() {
            log::warn!("News analysis missing fields {:?}, using defaults", missing);
        }

        let category = or_default(
            "CATEGORY",
            fields
                .require("CATEGORY")
                .and_then(|v| v.parse::<Category>().map_err(|e| BriefingError::parse("CATEGORY", e))),
            Category::General,
        );

        let country = fields
            .get("COUNTRY")
            .map(normalize_country)
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let count = or_default("COUNT", fields.number::<usize>("COUNT"), DEFAULT_COUNT)
            .clamp(1, MAX_ARTICLES);

        Self {
            category,
            country,
            count,
            keywords: fields.get("KEYWORDS").map(|k| k.to_string()),
        }
    }

    pub fn region(&self) -> Region {
        Region::from_country_code(&self.country)
    }
}

/// Known countries become their API code (`India` -> `in`); anything else is
/// kept as given and resolves to the global region.
fn normalize_country(raw: &str) -> String {
    match Region::from_country_code(raw) {
        Region::Global => raw.trim().to_lowercase(),
        region => region.country_code().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reply() {
        let query = NewsQuery::from_reply("CATEGORY: technology\nCOUNTRY: IN\nCOUNT: 3\nKEYWORDS: startups, AI");
        assert_eq!(query.category, Category::Technology);
        assert_eq!(query.country, "in");
        assert_eq!(query.count, 3);
        assert_eq!(query.keywords.as_deref(), Some("startups, AI"));
    }

    #[test]
    fn test_defaults_for_missing_or_placeholder_fields() {
        let query = NewsQuery::from_reply("COUNTRY: unspecified\nKEYWORDS: None");
        assert_eq!(query, NewsQuery::default());
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let query = NewsQuery::from_reply("CATEGORY: gossip\nCOUNTRY: unknown\nCOUNT: lots");
        assert_eq!(query.category, Category::General);
        assert_eq!(query.country, "us");
        assert_eq!(query.count, DEFAULT_COUNT);
    }

    #[test]
    fn test_country_names_normalized() {
        let query = NewsQuery::from_reply("COUNTRY: India");
        assert_eq!(query.country, "in");
        assert_eq!(query.region(), Region::India);

        assert_eq!(NewsQuery::from_reply("COUNTRY: UK").country, "gb");
        assert_eq!(NewsQuery::from_reply("COUNTRY: USA").region(), Region::Us);
    }

    #[test]
    fn test_unlisted_country_resolves_to_global() {
        let query = NewsQuery::from_reply("COUNTRY: France");
        assert_eq!(query.country, "france");
        assert_eq!(query.region(), Region::Global);
    }

    #[test]
    fn test_count_clamped() {
        assert_eq!(NewsQuery::from_reply("COUNT: 25").count, MAX_ARTICLES);
        assert_eq!(NewsQuery::from_reply("COUNT: 0").count, 1);
    }

    #[test]
    fn test_unstructured_reply() {
        let query = NewsQuery::from_reply("I think the user wants tech news.");
        assert_eq!(query, NewsQuery::default());
    }
}
