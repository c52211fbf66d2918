mod common;

use common::{article, StubSource};
use daily_briefing::news::ordering::parse_timestamp;
use daily_briefing::news::{
    AggregationRequest, AggregationStatus, Category, NewsAggregator, NewsSource, Region,
    TimestampOrdering,
};
use std::sync::atomic::Ordering;

fn request(max_articles: usize) -> AggregationRequest {
    AggregationRequest::new(Category::Technology, Region::India, max_articles)
}

#[tokio::test]
async fn test_secondary_source_skipped_when_quota_met() {
    let rss = StubSource::new(
        "rss",
        vec![
            article("Chip plant opens in Gujarat", "Feed A", "2024-03-05T10:00:00Z"),
            article("Startup raises record seed round", "Feed B", "2024-03-05T09:00:00Z"),
            article("Telecom operators cut data prices", "Feed C", "2024-03-05T08:00:00Z"),
        ],
    );
    let api = StubSource::new("newsapi", vec![article("Unused", "API", "2024-03-05T11:00:00Z")]);
    let api_calls = api.calls();

    let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(rss), Box::new(api)];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::Chronological);
    let result = aggregator.aggregate(&request(3)).await;

    assert_eq!(result.articles.len(), 3);
    assert_eq!(result.sources_used, vec!["rss"]);
    assert_eq!(api_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_falls_through_failed_source_with_remaining_quota() {
    let rss = StubSource::failing("rss");
    let api = StubSource::new(
        "newsapi",
        vec![article("Monsoon arrives early in Kerala", "API", "2024-06-01T06:00:00Z")],
    );
    let api_requests = api.requests();

    let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(rss), Box::new(api)];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::default());
    let result = aggregator.aggregate(&request(4)).await;

    assert_eq!(result.status, AggregationStatus::Success);
    assert_eq!(result.articles.len(), 1);
    assert_eq!(result.sources_used, vec!["newsapi"]);

    let seen = api_requests.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].max_articles, 4);
    assert_eq!(seen[0].region, Region::India);
}

#[tokio::test]
async fn test_output_never_exceeds_requested_count() {
    let batch = |prefix: &str| {
        (0..4)
            .map(|i| {
                article(
                    &format!("{} story number {}", prefix, i),
                    prefix,
                    &format!("2024-03-0{}T12:00:00Z", i + 1),
                )
            })
            .collect::<Vec<_>>()
    };

    let sources: Vec<Box<dyn NewsSource>> = vec![
        Box::new(StubSource::new("rss", batch("alpha"))),
        Box::new(StubSource::new("newsapi", batch("beta"))),
        Box::new(StubSource::new("newsdata", batch("gamma"))),
    ];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::Chronological);

    for wanted in [1, 2, 5] {
        let result = aggregator.aggregate(&request(wanted)).await;
        assert!(result.articles.len() <= wanted);
        assert_eq!(result.total_results, result.articles.len());
    }
}

#[tokio::test]
async fn test_near_duplicates_collapse() {
    let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(StubSource::new(
        "rss",
        vec![
            article("Apple unveils new iPhone model today", "Feed A", "2024-03-05T10:00:00Z"),
            article("Apple unveils new iPhone model", "Feed B", "2024-03-05T09:00:00Z"),
            article("Markets rally after rate decision", "Feed C", "2024-03-05T08:00:00Z"),
        ],
    ))];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::Chronological);
    let result = aggregator.aggregate(&request(5)).await;

    let titles: Vec<_> = result.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Apple unveils new iPhone model today", "Markets rally after rate decision"]
    );
}

#[tokio::test]
async fn test_incomplete_articles_filtered() {
    let mut untitled = article("x", "Feed", "2024-03-05T10:00:00Z");
    untitled.title = "   ".to_string();
    let mut bare = article("No description here", "Feed", "2024-03-05T10:00:00Z");
    bare.description = None;

    let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(StubSource::new(
        "rss",
        vec![untitled, bare, article("Complete item", "Feed", "2024-03-05T10:00:00Z")],
    ))];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::Chronological);
    let result = aggregator.aggregate(&request(5)).await;

    assert_eq!(result.articles.len(), 1);
    assert_eq!(result.articles[0].title, "Complete item");
}

#[tokio::test]
async fn test_mixed_timestamp_formats_sorted_newest_first() {
    let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(StubSource::new(
        "mixed",
        vec![
            article("Oldest rss entry", "Feed", "Mon, 04 Mar 2024 08:00:00 GMT"),
            article("Newest api entry", "API", "2024-03-06T08:00:00Z"),
            article("Middle newsdata entry", "Data", "2024-03-05 08:00:00"),
            article("Undated entry", "Feed", "sometime"),
        ],
    ))];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::Chronological);
    let result = aggregator.aggregate(&request(10)).await;

    let titles: Vec<_> = result.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Newest api entry",
            "Middle newsdata entry",
            "Oldest rss entry",
            "Undated entry"
        ]
    );
    assert!(parse_timestamp(&result.articles[0].published_at).is_some());
}

#[tokio::test]
async fn test_zero_sources_is_empty_success() {
    let aggregator = NewsAggregator::new(Vec::new(), TimestampOrdering::Chronological);
    let result = aggregator.aggregate(&request(5)).await;

    assert_eq!(result.status, AggregationStatus::Success);
    assert!(result.articles.is_empty());
    assert!(result.sources_used.is_empty());
    assert_eq!(result.total_results, 0);
}

#[tokio::test]
async fn test_all_sources_failing_is_empty_success() {
    let sources: Vec<Box<dyn NewsSource>> = vec![
        Box::new(StubSource::failing("rss")),
        Box::new(StubSource::failing("newsapi")),
    ];
    let aggregator = NewsAggregator::new(sources, TimestampOrdering::Chronological);
    let result = aggregator.aggregate(&request(3)).await;

    assert_eq!(result.status, AggregationStatus::Success);
    assert!(result.articles.is_empty());
}
