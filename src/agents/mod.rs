pub use crate::agent::Agent;

pub mod news;
pub mod orchestrator;
mod unavailable;
pub mod weather;

pub use news::NewsAgent;
pub use orchestrator::OrchestratorAgent;
pub use unavailable::UnavailableAgent;
pub use weather::WeatherAgent;
