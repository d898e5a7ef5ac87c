pub mod analyzer;
pub mod converter;
pub mod extract;
pub mod models;
pub mod prompts;
pub mod provider;

pub mod mock;

pub use analyzer::FeedbackAnalyzer;
pub use mock::{MockProvider, MockResponse};
pub use provider::AnthropicProvider;
