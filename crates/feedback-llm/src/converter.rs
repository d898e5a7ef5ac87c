//! Anthropic Messages API wire types.

use serde::Deserialize;
use serde_json::{json, Value};

use feedback_core::errors::GatewayError;
use feedback_core::provider::CompletionRequest;

/// Build the request body for a single user turn.
pub fn build_request_body(request: &CompletionRequest, model: &str, max_tokens: u32) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [
            {
                "role": "user",
                "content": request.prompt,
            }
        ],
    })
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Pull the reply text out of the first content block.
pub fn extract_reply_text(body: &str) -> Result<String, GatewayError> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("malformed response body: {e}")))?;

    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or_else(|| GatewayError::InvalidResponse("response has no text content".into()))
}
