use crate::error::{BriefingError, Result};
use crate::news::TimestampOrdering;
use crate::retry::RetryPolicy;
use crate::weather::Units;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Settings for the Claude Messages API
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

/// Keys and limits for the news sources
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub news_api_key: Option<String>,
    pub newsdata_api_key: Option<String>,
    pub timeout_seconds: u64,
    pub ordering: TimestampOrdering,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub units: Units,
    pub default_location: String,
    pub timeout_seconds: u64,
}

/// Deadlines and retry policy for the master orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub retry: RetryPolicy,
    pub pipeline_timeout: Duration,
    pub agent_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pipeline_timeout: Duration::from_secs(30),
            agent_timeout: Duration::from_secs(15),
        }
    }
}

/// Everything the briefing service needs, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub claude: ClaudeConfig,
    pub news: NewsConfig,
    pub weather: WeatherConfig,
    pub orchestrator: OrchestratorSettings,
    pub transcript_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup and validate the result.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let claude = ClaudeConfig {
            api_key: get("CLAUDE_API_KEY").ok_or_else(|| {
                BriefingError::Configuration("CLAUDE_API_KEY environment variable not set".to_string())
            })?,
            api_url: get("CLAUDE_API_URL")
                .unwrap_or_else(|| "https://api.anthropic.com/v1/messages".to_string()),
            model: get("CLAUDE_MODEL").unwrap_or_else(|| "claude-sonnet-4-20250514".to_string()),
            max_tokens: parse_or(&get, "CLAUDE_MAX_TOKENS", 2048)?,
            temperature: parse_or(&get, "CLAUDE_TEMPERATURE", 0.7)?,
            timeout_seconds: parse_or(&get, "CLAUDE_TIMEOUT", 60)?,
        };

        let news = NewsConfig {
            news_api_key: get("NEWS_API_KEY"),
            newsdata_api_key: get("NEWSDATA_API_KEY"),
            timeout_seconds: parse_or(&get, "NEWS_TIMEOUT", 10)?,
            ordering: parse_or(&get, "BRIEFING_TIMESTAMP_ORDER", TimestampOrdering::default())?,
        };

        let weather = WeatherConfig {
            api_key: get("OPENWEATHER_API_KEY"),
            api_url: get("OPENWEATHER_API_URL")
                .unwrap_or_else(|| "https://api.openweathermap.org/data/2.5/weather".to_string()),
            units: parse_or(&get, "WEATHER_UNITS", Units::Metric)?,
            default_location: get("WEATHER_DEFAULT_LOCATION").unwrap_or_else(|| "Mumbai".to_string()),
            timeout_seconds: parse_or(&get, "WEATHER_TIMEOUT", 10)?,
        };

        let max_attempts: u32 = parse_or(&get, "BRIEFING_MAX_ATTEMPTS", 3)?;
        let backoff_ms: u64 = parse_or(&get, "BRIEFING_BACKOFF_MS", 1000)?;
        let orchestrator = OrchestratorSettings {
            retry: RetryPolicy {
                max_attempts,
                base_delay: Duration::from_millis(backoff_ms),
                multiplier: 2.0,
            },
            pipeline_timeout: Duration::from_secs(parse_or(&get, "BRIEFING_PIPELINE_TIMEOUT", 30)?),
            agent_timeout: Duration::from_secs(parse_or(&get, "BRIEFING_AGENT_TIMEOUT", 15)?),
        };

        let config = Self {
            claude,
            news,
            weather,
            orchestrator,
            transcript_dir: get("BRIEFING_TRANSCRIPT_DIR").map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.claude.temperature) {
            return Err(BriefingError::Configuration(format!(
                "CLAUDE_TEMPERATURE must be between 0.0 and 1.0, got {}",
                self.claude.temperature
            )));
        }
        if self.claude.max_tokens == 0 {
            return Err(BriefingError::Configuration("CLAUDE_MAX_TOKENS must be positive".to_string()));
        }

        let timeouts = [
            ("CLAUDE_TIMEOUT", self.claude.timeout_seconds),
            ("NEWS_TIMEOUT", self.news.timeout_seconds),
            ("WEATHER_TIMEOUT", self.weather.timeout_seconds),
            ("BRIEFING_PIPELINE_TIMEOUT", self.orchestrator.pipeline_timeout.as_secs()),
            ("BRIEFING_AGENT_TIMEOUT", self.orchestrator.agent_timeout.as_secs()),
        ];
        for (key, value) in timeouts {
            if value == 0 {
                return Err(BriefingError::Configuration(format!("{} must be positive", key)));
            }
        }

        if self.orchestrator.retry.max_attempts == 0 {
            return Err(BriefingError::Configuration(
                "BRIEFING_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| BriefingError::Configuration(format!("invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
