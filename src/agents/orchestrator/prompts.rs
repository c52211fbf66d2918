pub const SECTIONS: [&str; 3] = [
    "## Detailed Weather Report",
    "## News Digest",
    "## Actionable Insights",
];

pub const CLARIFICATION: &str = "I'm not sure what kind of briefing you need. \
Could you please specify if you want weather, news, or both?";

pub const SYSTEM: &str = r#"You coordinate a daily briefing service with two specialists:
- a weather agent that reports current conditions for one location
- a news agent that summarises recent articles for a category and country

Decide which specialists a request needs. Greetings such as "good morning" or
requests for a "daily briefing" need both. Only report what the specialists return."#;

pub fn classification_prompt(request: &str) -> String {
    format!(
        r#"ANALYZE THIS REQUEST: "{request}"

Answer with exactly these five lines:
NEEDS_WEATHER: yes or no
WEATHER_LOCATION: the place mentioned, or default
NEEDS_NEWS: yes or no
NEWS_CATEGORIES: comma-separated categories (technology, business, health, sports, entertainment, science) or general
DELEGATION_EXPLANATION: one sentence on why"#
    )
}

pub fn synthesis_prompt(combined: &str, degraded: bool) -> String {
    let note = if degraded {
        "\nSome services were unavailable. Focus on the information that is available and keep a professional tone.\n"
    } else {
        ""
    };

    format!(
        r#"Turn the material below into a professional daily briefing.

SOURCE DATA:
{combined}

Use exactly these three markdown sections, in this order, and stop after the last one:

{weather}
Temperature, conditions and what they mean for travel and plans.

{news}
The key developments and why they matter.

{insights}
Concrete recommendations that connect the weather and the news.

Use ## headers only, no numbered or bold headings, no closing or outlook sections.
{note}"#,
        weather = SECTIONS[0],
        news = SECTIONS[1],
        insights = SECTIONS[2],
    )
}

/// Sections the synthesized text is missing
pub fn missing_sections(text: &str) -> Vec<&'static str> {
    SECTIONS
        .iter()
        .copied()
        .filter(|s| !text.contains(s))
        .collect()
}

pub fn weather_block(text: &str) -> String {
    format!("**Weather Update:**\n{}", text)
}

pub fn news_block(text: &str) -> String {
    format!("**News Update:**\n{}", text)
}

pub fn service_status_note(failed: &[&str]) -> String {
    format!(
        "**Service Status**: {} service(s) temporarily unavailable. \
         Please try again in a few minutes for complete coverage.",
        failed.join(", ")
    )
}

pub fn apology(error: &str) -> String {
    format!("I encountered an error while preparing your briefing: {}", error)
}

pub fn timeout_fallback(request: &str) -> String {
    format!(
        r#"**Service Temporarily Busy**

The daily briefing service is taking longer than usual to respond.

**Your request**: {request}

Please try again in 2-3 minutes, or check a weather app and your usual news sources directly."#
    )
}

pub fn error_fallback(request: &str) -> String {
    format!(
        r#"**Service Notice**

Your daily briefing could not be prepared because of a temporary service disruption.

**Your request**: {request}

Please try again in 5-10 minutes. Weather apps and news sites remain available in the meantime."#
    )
}
