use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use feedback_core::errors::GatewayError;
use feedback_core::provider::{CompletionRequest, LlmProvider};

/// Pre-programmed replies for deterministic testing without API calls.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this text as the model reply.
    Text(String),
    /// Fail the call with this error.
    Error(GatewayError),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Convenience: an upstream failure with the given status.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Error(GatewayError::Upstream {
            status,
            body: body.into(),
        })
    }
}

/// Mock provider that returns pre-programmed responses in sequence and
/// records every request it receives.
pub struct MockProvider {
    responses: Vec<MockResponse>,
    call_count: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().push(request.clone());

        let Some(response) = self.responses.get(idx) else {
            return Err(GatewayError::InvalidResponse(format!(
                "MockProvider: no response configured for call {idx}"
            )));
        };

        match response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Error(e) => Err(e.clone()),
        }
    }
}
