#![allow(dead_code)]

use async_trait::async_trait;
use daily_briefing::agent::Agent;
use daily_briefing::error::{BriefingError, Result};
use daily_briefing::llm::{LanguageModel, LlmRequest};
use daily_briefing::news::{AggregationRequest, Article, NewsSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Reply {
    Text(String),
    /// Answer with the prompt itself
    Echo,
    Fail(String),
}

struct Rule {
    marker: String,
    reply: Reply,
    delay: Duration,
}

/// Language model that answers by matching markers in the prompt.
/// Rules are checked in the order they were added; the first match wins.
#[derive(Default)]
pub struct ScriptedModel {
    rules: Vec<Rule>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn rule(mut self, marker: &str, reply: Reply, delay: Duration) -> Self {
        self.rules.push(Rule {
            marker: marker.to_string(),
            reply,
            delay,
        });
        self
    }

    pub fn reply(self, marker: &str, text: &str) -> Self {
        self.rule(marker, Reply::Text(text.to_string()), Duration::ZERO)
    }

    pub fn reply_after(self, marker: &str, text: &str, delay: Duration) -> Self {
        self.rule(marker, Reply::Text(text.to_string()), delay)
    }

    pub fn echo(self, marker: &str) -> Self {
        self.rule(marker, Reply::Echo, Duration::ZERO)
    }

    pub fn fail(self, marker: &str, message: &str) -> Self {
        self.rule(marker, Reply::Fail(message.to_string()), Duration::ZERO)
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls_containing(&self, marker: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(marker)).count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let rule = self
            .rules
            .iter()
            .find(|r| request.prompt.contains(&r.marker))
            .ok_or_else(|| BriefingError::Llm(format!("no scripted reply for {}", request.caller)))?;

        if !rule.delay.is_zero() {
            tokio::time::sleep(rule.delay).await;
        }

        match &rule.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Echo => Ok(request.prompt.clone()),
            Reply::Fail(message) => Err(BriefingError::Llm(message.clone())),
        }
    }
}

/// News source returning a fixed batch and recording what it was asked for
pub struct StubSource {
    name: String,
    articles: Vec<Article>,
    fail: bool,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<AggregationRequest>>>,
}

impl StubSource {
    pub fn new(name: &str, articles: Vec<Article>) -> Self {
        Self {
            name: name.to_string(),
            articles,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(name, Vec::new())
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<AggregationRequest>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl NewsSource for StubSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn try_fetch(&self, request: &AggregationRequest) -> Result<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(*request);

        if self.fail {
            return Err(BriefingError::unavailable(&self.name, "connection refused"));
        }
        Ok(self.articles.clone())
    }
}

/// Sub-agent with a canned answer, optionally slow or failing
pub struct StubAgent {
    name: String,
    reply: String,
    delay: Duration,
    fail: bool,
    fallback: String,
}

impl StubAgent {
    pub fn new(name: &str, reply: &str, fallback: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: reply.to_string(),
            delay: Duration::ZERO,
            fail: false,
            fallback: fallback.to_string(),
        }
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl Agent for StubAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    fn fallback_message(&self) -> &str {
        &self.fallback
    }

    async fn execute(&self, _task: &str) -> anyhow::Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            anyhow::bail!("{} is down", self.name);
        }
        Ok(self.reply.clone())
    }
}

pub fn article(title: &str, source: &str, published_at: &str) -> Article {
    Article {
        title: title.to_string(),
        description: Some(format!("Details about {}", title.to_lowercase())),
        url: format!("https://news.example.com/{}", title.to_lowercase().replace(' ', "-")),
        published_at: published_at.to_string(),
        published: None,
        source: source.to_string(),
        content: None,
    }
}

/// Minimal HTTP server answering GET requests from a fixed route table.
/// Each route is matched by the suffix of the request path; unmatched
/// paths get a 404. Request targets are recorded in arrival order.
pub struct CannedServer {
    pub url: String,
    targets: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub async fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        // reqwest honours proxy variables; keep loopback traffic direct
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        std::env::set_var("no_proxy", "127.0.0.1,localhost");

        let routes: Arc<Vec<(String, u16, String)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), status, body.to_string()))
                .collect(),
        );
        let targets = Arc::new(Mutex::new(Vec::new()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let recorded = targets.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(serve(socket, routes.clone(), recorded.clone()));
            }
        });

        Self { url, targets }
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

async fn serve(
    mut socket: tokio::net::TcpStream,
    routes: Arc<Vec<(String, u16, String)>>,
    targets: Arc<Mutex<Vec<String>>>,
) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&head);
    let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let path = target.split('?').next().unwrap_or("").to_string();
    targets.lock().unwrap().push(target);

    let (status, body) = routes
        .iter()
        .find(|(suffix, _, _)| path.ends_with(suffix.as_str()))
        .map(|(_, status, body)| (*status, body.clone()))
        .unwrap_or((404, "{}".to_string()));
    let reason = if status == 200 { "OK" } else { "Error" };

    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}
