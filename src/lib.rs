pub mod agent;
pub mod agents;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod news;
pub mod retry;
pub mod tool;
pub mod utils;
pub mod weather;

pub use agent::Agent;
pub use agents::OrchestratorAgent;
pub use config::AppConfig;
pub use error::{BriefingError, Result};
pub use retry::RetryPolicy;

