mod common;

use common::CannedServer;
use daily_briefing::error::BriefingError;
use daily_briefing::news::sources::{NewsApiSource, NewsDataSource};
use daily_briefing::news::{AggregationRequest, Category, NewsSource, Region};

const EMPTY_HEADLINES: &str = r#"{"status": "ok", "totalResults": 0, "articles": []}"#;

const REMOVED_HEADLINES: &str = r#"{"status": "ok", "totalResults": 1, "articles": [
    {"source": {"name": null}, "title": "[Removed]", "description": "[Removed]",
     "url": "https://removed.com", "publishedAt": "1970-01-01T00:00:00Z"}
]}"#;

const SEARCH_RESULTS: &str = r#"{"status": "ok", "totalResults": 1, "articles": [
    {"source": {"name": "The Hindu"}, "title": "Bengaluru hosts chip summit",
     "description": "Semiconductor makers gather.", "url": "https://hindu.example/1",
     "publishedAt": "2024-03-05T06:00:00Z"}
]}"#;

const HEADLINES: &str = r#"{"status": "ok", "totalResults": 1, "articles": [
    {"source": {"name": "Mint"}, "title": "IT exports rise", "description": "Quarterly growth.",
     "url": "https://mint.example/1", "publishedAt": "2024-03-05T07:00:00Z"}
]}"#;

fn indian_tech(max_articles: usize) -> AggregationRequest {
    AggregationRequest::new(Category::Technology, Region::India, max_articles)
}

fn newsapi(server: &CannedServer) -> NewsApiSource {
    NewsApiSource::new("test-key", 5)
        .unwrap()
        .with_base_url(server.url.as_str())
}

#[tokio::test]
async fn test_empty_headlines_fall_back_to_search() {
    let server = CannedServer::start(vec![
        ("/top-headlines", 200, EMPTY_HEADLINES),
        ("/everything", 200, SEARCH_RESULTS),
    ])
    .await;

    let articles = newsapi(&server).try_fetch(&indian_tech(3)).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, "The Hindu");

    let targets = server.targets();
    assert_eq!(targets.len(), 2);
    assert!(targets[0].starts_with("/top-headlines?"));
    assert!(targets[0].contains("country=in"));
    assert!(targets[0].contains("category=technology"));
    assert!(targets[0].contains("pageSize=3"));

    assert!(targets[1].starts_with("/everything?"));
    assert!(targets[1].contains("q=technology"));
    assert!(targets[1].contains("India"));
    assert!(targets[1].contains("from=20"));
    assert!(targets[1].contains("language=en"));
    assert!(targets[1].contains("sortBy=publishedAt"));
}

#[tokio::test]
async fn test_removed_headlines_fall_back_to_search() {
    let server = CannedServer::start(vec![
        ("/top-headlines", 200, REMOVED_HEADLINES),
        ("/everything", 200, SEARCH_RESULTS),
    ])
    .await;

    let articles = newsapi(&server).try_fetch(&indian_tech(3)).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Bengaluru hosts chip summit");
    assert_eq!(server.targets().len(), 2);
}

#[tokio::test]
async fn test_usable_headlines_skip_search() {
    let server = CannedServer::start(vec![
        ("/top-headlines", 200, HEADLINES),
        ("/everything", 200, SEARCH_RESULTS),
    ])
    .await;

    let general = AggregationRequest::new(Category::General, Region::Us, 5);
    let articles = newsapi(&server).try_fetch(&general).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "IT exports rise");

    let targets = server.targets();
    assert_eq!(targets.len(), 1);
    assert!(targets[0].contains("country=us"));
    assert!(!targets[0].contains("category="));
}

#[tokio::test]
async fn test_invalid_key_is_unavailable() {
    let server = CannedServer::start(vec![(
        "/top-headlines",
        401,
        r#"{"status": "error", "code": "apiKeyInvalid"}"#,
    )])
    .await;
    let source = newsapi(&server);

    let err = source.try_fetch(&indian_tech(3)).await.unwrap_err();
    assert!(matches!(err, BriefingError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("invalid API key"));

    assert!(source.fetch(&indian_tech(3)).await.is_empty());
}

#[tokio::test]
async fn test_rate_limit_is_unavailable() {
    let server = CannedServer::start(vec![(
        "/top-headlines",
        426,
        r#"{"status": "error", "code": "rateLimited"}"#,
    )])
    .await;
    let source = newsapi(&server);

    let err = source.try_fetch(&indian_tech(3)).await.unwrap_err();
    assert!(matches!(err, BriefingError::SourceUnavailable { .. }));
    assert!(err.to_string().contains("rate limit"));

    assert!(source.fetch(&indian_tech(3)).await.is_empty());
    assert!(server.targets().iter().all(|t| t.starts_with("/top-headlines")));
}

#[tokio::test]
async fn test_newsdata_success_and_error_status() {
    let server = CannedServer::start(vec![
        (
            "/ok/news",
            200,
            r#"{"status": "success", "results": [
                {"title": "Budget session begins", "link": "https://nd.example/1",
                 "description": "Parliament convenes.", "pubDate": "2024-02-01 05:30:00",
                 "source_id": "livemint"}
            ]}"#,
        ),
        ("/failing/news", 200, r#"{"status": "error", "results": []}"#),
    ])
    .await;

    let working = NewsDataSource::new("test-key", 5)
        .unwrap()
        .with_url(format!("{}/ok/news", server.url));
    let articles = working.try_fetch(&indian_tech(2)).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, "livemint");

    let targets = server.targets();
    assert!(targets[0].contains("apikey=test-key"));
    assert!(targets[0].contains("country=in"));
    assert!(targets[0].contains("category=technology"));

    let failing = NewsDataSource::new("test-key", 5)
        .unwrap()
        .with_url(format!("{}/failing/news", server.url));
    assert!(matches!(
        failing.try_fetch(&indian_tech(2)).await,
        Err(BriefingError::SourceUnavailable { .. })
    ));
    assert!(failing.fetch(&indian_tech(2)).await.is_empty());
}
