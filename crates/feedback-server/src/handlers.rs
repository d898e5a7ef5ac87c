//! Route handlers for the analysis API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};
use uuid::Uuid;

use feedback_core::analysis::AnalysisResult;
use feedback_core::dataset::prepare_dataset;

use crate::error::{ApiError, Endpoint};
use crate::server::AppState;

/// Paths advertised by the health endpoint.
pub const ENDPOINTS: [&str; 3] = ["/api/analyze", "/api/analyze-bulk", "/api/health"];

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBulkRequest {
    #[serde(default, rename = "csvData")]
    pub csv_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub endpoints: [&'static str; 3],
}

/// `POST /api/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::rejected(Endpoint::Single, &rejection))?;
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("analyze", %request_id);

    async move {
        info!("analysis request received");
        let feedback = request.feedback.unwrap_or_default();
        let analysis = state.analyzer.analyze_single(&feedback).await.map_err(ApiError::single)?;
        Ok::<_, ApiError>(Json(AnalysisResult::from(analysis)))
    }
    .instrument(span)
    .await
}

/// `POST /api/analyze-bulk`
pub async fn analyze_bulk(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeBulkRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::rejected(Endpoint::Bulk, &rejection))?;
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("analyze_bulk", %request_id);

    async move {
        let csv_data = request.csv_data.unwrap_or_default();
        info!(bytes = csv_data.len(), "bulk analysis request received");

        let dataset = prepare_dataset(&csv_data, &state.policy).map_err(ApiError::bulk)?;
        info!(
            headers = ?dataset.headers,
            columns = ?dataset.column_labels(),
            entries = dataset.total_entries(),
            "feedback columns detected"
        );

        let analysis = state.analyzer.analyze_bulk(&dataset).await.map_err(ApiError::bulk)?;
        Ok::<_, ApiError>(Json(AnalysisResult::from(analysis)))
    }
    .instrument(span)
    .await
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running!",
        timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        endpoints: ENDPOINTS,
    })
}
