use async_trait::async_trait;

use crate::errors::GatewayError;

/// A single-turn completion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// The user message sent to the model.
    pub prompt: String,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Trait implemented by text-generation backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    /// Send one prompt and return the reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
