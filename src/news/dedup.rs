use super::Article;
use std::collections::HashSet;

/// Overlap at or above this fraction marks two titles as the same story.
pub const DUPLICATE_THRESHOLD: f64 = 0.7;

fn title_words(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

/// Shared words divided by the size of the larger word set.
pub fn title_overlap(a: &str, b: &str) -> f64 {
    overlap_ratio(&title_words(a), &title_words(b))
}

fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / larger as f64
}

fn is_duplicate(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    let larger = a.len().max(b.len());
    // integer form of shared / larger >= 0.7, exact at the boundary
    larger > 0 && a.intersection(b).count() * 10 >= larger * 7
}

/// Greedy first-wins pass: an article is kept unless its title overlaps an
/// already kept title by the duplicate threshold. Blank titles are dropped.
pub fn remove_duplicates(articles: Vec<Article>) -> Vec<Article> {
    let mut accepted: Vec<HashSet<String>> = Vec::new();
    let mut unique = Vec::with_capacity(articles.len());

    for article in articles {
        let words = title_words(article.title.trim());
        if words.is_empty() {
            continue;
        }
        if accepted.iter().any(|seen| is_duplicate(&words, seen)) {
            log::debug!("Dropping near-duplicate headline: {}", article.title);
            continue;
        }
        accepted.push(words);
        unique.push(article);
    }

    unique
}
