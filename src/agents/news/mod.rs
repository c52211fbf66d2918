mod agent;
mod prompts;
pub mod query;
pub mod tool;

pub use agent::{NewsAgent, NO_ARTICLES};
pub use query::NewsQuery;
pub use tool::NewsTool;
