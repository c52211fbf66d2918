use crate::news::{AggregationResult, Article};

pub const SYSTEM: &str = "You are a news analyst who writes short, factual briefings from the \
articles you are given. Never invent stories or details that are not in the source material.";

/// Prompt asking the model to turn a free-text request into tagged fields
pub fn analysis_prompt(request: &str) -> String {
    format!(
        r#"Work out which news the user wants.

NEWS REQUEST TO ANALYZE: "{request}"

Answer with exactly these four lines and nothing else:
CATEGORY: one of general, technology, business, health, sports, entertainment, science
COUNTRY: two-letter country code such as in, us or gb (use us when no country is mentioned)
COUNT: number of articles between 1 and 10 (use 5 when no number is mentioned)
KEYWORDS: specific topics or names the user asked about, or none"#
    )
}

fn format_article(index: usize, article: &Article) -> String {
    format!(
        "Article {}:\nTitle: {}\nSource: {}\nPublished: {}\nSummary: {}\nURL: {}",
        index + 1,
        article.title,
        article.source,
        article.published_at,
        article.description.as_deref().unwrap_or("No summary available"),
        article.url
    )
}

/// Prompt asking the model to write the final news briefing
pub fn briefing_prompt(request: &str, result: &AggregationResult) -> String {
    let articles = result
        .articles
        .iter()
        .enumerate()
        .map(|(i, a)| format_article(i, a))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Create a professional news briefing for this request: "{request}"

Collected from: {sources}

{articles}

Write one short paragraph per article with its headline, the key facts and the source.
Close with a one-sentence overview of the common themes. Keep it concise."#,
        sources = result.sources_used.join(", "),
    )
}
