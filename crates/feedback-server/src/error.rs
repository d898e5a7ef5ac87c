//! HTTP rendering of analysis failures.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use feedback_core::errors::AnalysisError;

const BULK_FAILURE_HINT: &str = "This could be due to API limits, large file size, \
     or malformed data. Try with a smaller file or check your CSV format.";

/// Which endpoint produced the error; the two render failures differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Single,
    Bulk,
}

/// An [`AnalysisError`] bound to the endpoint that will render it.
#[derive(Debug)]
pub struct ApiError {
    endpoint: Endpoint,
    error: AnalysisError,
}

impl ApiError {
    pub fn single(error: AnalysisError) -> Self {
        Self {
            endpoint: Endpoint::Single,
            error,
        }
    }

    pub fn bulk(error: AnalysisError) -> Self {
        Self {
            endpoint: Endpoint::Bulk,
            error,
        }
    }

    /// A request body that failed to decode as JSON.
    pub fn rejected(endpoint: Endpoint, rejection: &JsonRejection) -> Self {
        Self {
            endpoint,
            error: AnalysisError::validation_with_details(
                "Invalid JSON request body",
                rejection.body_text(),
            ),
        }
    }

    pub fn error(&self) -> &AnalysisError {
        &self.error
    }

    /// Status code and JSON body for this error.
    pub fn parts(&self) -> (StatusCode, Value) {
        match (self.endpoint, &self.error) {
            (_, AnalysisError::Validation { error, details }) => {
                let mut body = json!({ "error": error });
                if let Some(details) = details {
                    body["details"] = json!(details);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            (Endpoint::Single, AnalysisError::Upstream { status, body }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": self.error.to_string(), "details": body }),
            ),
            (Endpoint::Single, AnalysisError::Format { message, raw_excerpt }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message, "rawResponse": raw_excerpt }),
            ),
            (Endpoint::Single, AnalysisError::Internal(message)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error", "message": message }),
            ),
            (Endpoint::Bulk, other) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Bulk analysis failed",
                    "message": other.to_string(),
                    "details": BULK_FAILURE_HINT,
                }),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        tracing::error!(
            kind = self.error.error_kind(),
            status = status.as_u16(),
            error = %self.error,
            "request failed"
        );
        (status, Json(body)).into_response()
    }
}
