use std::time::Duration;

/// Result type for briefing operations
pub type Result<T> = std::result::Result<T, BriefingError>;

/// Error taxonomy shared by sources, agents and the orchestrator.
///
/// Only `Configuration` is fatal. Every other variant is recovered at the
/// boundary that first sees it: sources return no articles, sub-agents
/// apologise, the orchestrator retries and falls back to static text.
#[derive(Debug, thiserror::Error)]
pub enum BriefingError {
    /// Missing or invalid setting, raised at construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A data source could not be reached or answered with a bad status
    #[error("Source {name} unavailable: {reason}")]
    SourceUnavailable { name: String, reason: String },

    /// Model output or a source payload did not have the expected shape
    #[error("Failed to parse {what}: {reason}")]
    ParseFailure { what: String, reason: String },

    /// The whole classify, delegate, synthesize pipeline ran out of time
    #[error("Briefing pipeline timed out after {0:?}")]
    PipelineTimeout(Duration),

    /// The final synthesis call failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailure(String),

    #[error("Invalid briefing transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The LLM provider rejected the call or returned nothing usable
    #[error("Language model error: {0}")]
    Llm(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BriefingError {
    pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            what: what.into(),
            reason: reason.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::PipelineTimeout(_) => true,
            Self::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
