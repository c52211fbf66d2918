mod agent;
mod prompts;
pub mod query;
pub mod tool;

pub use agent::{WeatherAgent, WEATHER_FALLBACK};
pub use query::WeatherQuery;
pub use tool::WeatherTool;
