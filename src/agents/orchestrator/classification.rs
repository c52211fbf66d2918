use crate::extract::{or_default, TaggedFields};

/// Which sub-agents a request needs, as decided by the model
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    pub needs_weather: bool,
    pub location: Option<String>,
    pub needs_news: bool,
    /// Empty means top news
    pub news_categories: Vec<String>,
    pub explanation: Option<String>,
}

impl Classification {
    pub const KEYS: [&'static str; 5] = [
        "NEEDS_WEATHER",
        "WEATHER_LOCATION",
        "NEEDS_NEWS",
        "NEWS_CATEGORIES",
        "DELEGATION_EXPLANATION",
    ];

    pub fn from_reply(reply: &str) -> Self {
        let fields = TaggedFields::parse(reply);
        let missing = fields.missing(&Self::KEYS);
        if !missing.is_empty() {
            log::warn!("Classification missing fields {:?}", missing);
        }

        let news_categories = fields
            .get("NEWS_CATEGORIES")
            .map(|raw| {
                raw.split(',')
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty() && c != "general")
                    .collect()
            })
            .unwrap_or_default();

        Self {
            needs_weather: or_default("NEEDS_WEATHER", fields.yes_no("NEEDS_WEATHER"), false),
            location: fields.get("WEATHER_LOCATION").map(str::to_string),
            needs_news: or_default("NEEDS_NEWS", fields.yes_no("NEEDS_NEWS"), false),
            news_categories,
            explanation: fields.get("DELEGATION_EXPLANATION").map(str::to_string),
        }
    }

    pub fn needs_anything(&self) -> bool {
        self.needs_weather || self.needs_news
    }

    pub fn weather_request(&self) -> String {
        match &self.location {
            Some(location) => format!("What's the weather like in {}?", location),
            None => "What's the weather like?".to_string(),
        }
    }

    pub fn news_request(&self) -> String {
        if self.news_categories.is_empty() {
            "Give me today's top news".to_string()
        } else {
            format!("Give me {} news", self.news_categories.join(", "))
        }
    }
}
