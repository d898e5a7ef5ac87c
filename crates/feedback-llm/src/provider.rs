use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use feedback_core::errors::GatewayError;
use feedback_core::provider::{CompletionRequest, LlmProvider};
use feedback_core::security::ApiKey;

use crate::converter;
use crate::models::{self, ClaudeModelInfo};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Non-streaming client for the Anthropic Messages API.
pub struct AnthropicProvider {
    client: Client,
    api_key: Option<ApiKey>,
    model: String,
    /// Known limits for `model`, if it is in the catalog.
    model_info: Option<&'static ClaudeModelInfo>,
    base_url: String,
}

impl AnthropicProvider {
    /// Create a provider. Unknown model names are sent verbatim; `None`
    /// selects the catalog default.
    pub fn new(api_key: Option<ApiKey>, model_name: Option<&str>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to build HTTP client: {e}")))?;

        let model = model_name.unwrap_or(models::default_model().name).to_string();
        let model_info = models::find_model(&model);

        Ok(Self {
            client,
            api_key,
            model,
            model_info,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MESSAGES_PATH)
    }

    fn build_request(&self, request: &CompletionRequest) -> reqwest::RequestBuilder {
        let max_tokens = self
            .model_info
            .map_or(request.max_tokens, |info| info.clamp_max_tokens(request.max_tokens));
        let body = converter::build_request_body(request, &self.model, max_tokens);

        let mut req = self.client.post(self.endpoint());
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key.expose());
        }
        req.header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model, max_tokens = request.max_tokens))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let resp = self
            .build_request(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Claude API error");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        converter::extract_reply_text(&body)
    }
}
