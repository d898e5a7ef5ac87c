/// Maximum characters of a raw model reply carried in a format error.
pub const RAW_EXCERPT_CHARS: usize = 500;

/// Transport-level errors from an LLM provider.
#[derive(Clone, Debug, thiserror::Error)]
pub enum GatewayError {
    /// The API answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    /// The API answered 2xx but the envelope was not what we expect.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream",
            Self::Network(_) => "network_error",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Failures of an analysis request, classified by how they surface to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Missing, blank or unusable input.
    #[error("{error}")]
    Validation {
        error: String,
        details: Option<String>,
    },
    /// The provider rejected the request.
    #[error("Claude API Error: {status}")]
    Upstream { status: u16, body: String },
    /// The model reply held no decodable JSON.
    #[error("{message}")]
    Format { message: String, raw_excerpt: String },
    #[error("{0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn validation(error: impl Into<String>) -> Self {
        Self::Validation {
            error: error.into(),
            details: None,
        }
    }

    pub fn validation_with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Validation {
            error: error.into(),
            details: Some(details.into()),
        }
    }

    /// Format error carrying at most [`RAW_EXCERPT_CHARS`] of `raw`.
    pub fn format(message: impl Into<String>, raw: &str) -> Self {
        Self::Format {
            message: message.into(),
            raw_excerpt: truncate_chars(raw, RAW_EXCERPT_CHARS).to_string(),
        }
    }

    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Upstream { .. } => "upstream",
            Self::Format { .. } => "format",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<GatewayError> for AnalysisError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Upstream { status, body } => Self::Upstream { status, body },
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Longest prefix of `text` with at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
