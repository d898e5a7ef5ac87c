//! Feedback analysis on top of an [`LlmProvider`].

use std::sync::Arc;

use tracing::{info, instrument};

use feedback_core::analysis::{BulkAnalysis, SingleAnalysis};
use feedback_core::dataset::FeedbackDataset;
use feedback_core::errors::AnalysisError;
use feedback_core::provider::{CompletionRequest, LlmProvider};

use crate::extract;
use crate::prompts;

const SINGLE_FORMAT_ERROR: &str = "Invalid response format from Claude API";
const BULK_FORMAT_ERROR: &str = "Invalid bulk analysis response format from Claude API";

/// Characters of incoming feedback echoed into the log.
const LOG_PREVIEW_CHARS: usize = 100;

/// Turns feedback into typed analyses via one model call per request.
pub struct FeedbackAnalyzer {
    provider: Arc<dyn LlmProvider>,
}

impl FeedbackAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Analyze a single piece of feedback.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn analyze_single(&self, feedback: &str) -> Result<SingleAnalysis, AnalysisError> {
        if feedback.trim().is_empty() {
            return Err(AnalysisError::validation("No feedback provided"));
        }

        let preview = feedback_core::errors::truncate_chars(feedback, LOG_PREVIEW_CHARS);
        info!(preview = %preview, "analyzing feedback");

        let request = CompletionRequest::new(
            prompts::single_feedback_prompt(feedback),
            prompts::SINGLE_MAX_TOKENS,
        );
        let reply = self.provider.complete(&request).await?;
        let analysis = extract::decode_reply(&reply, SINGLE_FORMAT_ERROR)?;

        info!("analysis completed");
        Ok(analysis)
    }

    /// Run an aggregate analysis over a prepared dataset and attach its metadata.
    #[instrument(
        skip_all,
        fields(provider = self.provider.name(), entries = dataset.total_entries())
    )]
    pub async fn analyze_bulk(
        &self,
        dataset: &FeedbackDataset,
    ) -> Result<BulkAnalysis, AnalysisError> {
        if dataset.sample.is_empty() {
            return Err(AnalysisError::validation("No valid feedback found in CSV"));
        }

        info!(
            total_rows = dataset.total_rows,
            analyzed = dataset.sample.analyzed_count(),
            columns = ?dataset.column_labels(),
            "starting bulk analysis"
        );

        let request = CompletionRequest::new(
            prompts::bulk_feedback_prompt(dataset),
            prompts::BULK_MAX_TOKENS,
        );
        let reply = self.provider.complete(&request).await?;
        let mut analysis: BulkAnalysis = extract::decode_reply(&reply, BULK_FORMAT_ERROR)?;
        analysis.metadata = Some(dataset.metadata());

        info!("bulk analysis completed");
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::analysis::OverallSentiment;
    use feedback_core::dataset::prepare_dataset;
    use feedback_core::sample::SamplingPolicy;

    use crate::mock::{MockProvider, MockResponse};

    const SINGLE_REPLY: &str = r#"Here is the analysis:
{
    "sentiment": {"overall": "Negative", "positive": 5, "negative": 85, "neutral": 10},
    "issues": [
        {
            "category": "Bug",
            "description": "Crash on upload",
            "priority": "high",
            "severity": "critical"
        }
    ],
    "actionItems": ["Fix upload crash"],
    "summary": "Uploads crash the app."
}
Let me know if you need more."#;

    const BULK_REPLY: &str = r#"{
    "aggregateSentiment": {"overall": "Mixed", "positive": 40, "negative": 45, "neutral": 15},
    "issueCategories": [
        {
            "category": "Performance",
            "description": "Slow loads",
            "priority": "medium",
            "severity": "major",
            "frequency": 7
        }
    ],
    "strategicRecommendations": ["Profile page loads"],
    "executiveSummary": "Users like features but find the app slow.",
    "priorityBreakdown": {"high": 1, "medium": 2, "low": 0}
}"#;

    fn analyzer(responses: Vec<MockResponse>) -> (FeedbackAnalyzer, Arc<MockProvider>) {
        let mock = Arc::new(MockProvider::new(responses));
        (FeedbackAnalyzer::new(mock.clone()), mock)
    }

    fn dataset(rows: usize) -> FeedbackDataset {
        let mut csv = String::from("id,feedback\n");
        for i in 0..rows {
            csv.push_str(&format!("{i},customer comment number {i}\n"));
        }
        prepare_dataset(&csv, &SamplingPolicy::default()).unwrap()
    }

    #[tokio::test]
    async fn single_blank_input_fails_fast() {
        let (analyzer, mock) = analyzer(vec![]);
        let err = analyzer.analyze_single("   \n").await.unwrap_err();
        assert_eq!(err, AnalysisError::validation("No feedback provided"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn single_decodes_reply_with_prose() {
        let (analyzer, mock) = analyzer(vec![MockResponse::text(SINGLE_REPLY)]);
        let analysis = analyzer.analyze_single("The app crashes on upload").await.unwrap();

        assert_eq!(analysis.sentiment.overall, OverallSentiment::Negative);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.action_items, vec!["Fix upload crash"]);

        let requests = mock.requests();
        assert_eq!(requests[0].max_tokens, 1200);
        assert!(requests[0].prompt.contains("The app crashes on upload"));
    }

    #[tokio::test]
    async fn single_upstream_error_propagates() {
        let (analyzer, _) = analyzer(vec![MockResponse::upstream(401, "invalid x-api-key")]);
        let err = analyzer.analyze_single("fine").await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Upstream {
                status: 401,
                body: "invalid x-api-key".into()
            }
        );
    }

    #[tokio::test]
    async fn single_reply_without_json_is_format_error() {
        let (analyzer, _) = analyzer(vec![MockResponse::text("Sorry, I can't do that.")]);
        let err = analyzer.analyze_single("fine").await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Format {
                message: SINGLE_FORMAT_ERROR.into(),
                raw_excerpt: "Sorry, I can't do that.".into(),
            }
        );
    }

    #[tokio::test]
    async fn single_reply_with_wrong_shape_is_format_error() {
        let (analyzer, _) = analyzer(vec![MockResponse::text(r#"{"mood": "happy"}"#)]);
        let err = analyzer.analyze_single("fine").await.unwrap_err();
        assert_eq!(err.error_kind(), "format");
    }

    #[tokio::test]
    async fn bulk_attaches_metadata() {
        let (analyzer, mock) = analyzer(vec![MockResponse::text(BULK_REPLY)]);
        let dataset = dataset(100);
        let analysis = analyzer.analyze_bulk(&dataset).await.unwrap();

        let metadata = analysis.metadata.unwrap();
        assert_eq!(metadata.total_rows_in_csv, 100);
        assert_eq!(metadata.total_entries, 50);
        assert_eq!(metadata.sample_analyzed, 25);
        assert_eq!(analysis.issue_categories[0].frequency, 7);

        let requests = mock.requests();
        assert_eq!(requests[0].max_tokens, 2500);
        assert!(requests[0].prompt.contains("- Sample size analyzed: 25"));
    }

    #[tokio::test]
    async fn bulk_format_error_uses_bulk_message() {
        let (analyzer, _) = analyzer(vec![MockResponse::text("not json")]);
        let err = analyzer.analyze_bulk(&dataset(3)).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Format { message, .. } if message == BULK_FORMAT_ERROR
        ));
    }

    #[tokio::test]
    async fn bulk_upstream_error_propagates() {
        let (analyzer, mock) = analyzer(vec![MockResponse::upstream(500, "boom")]);
        let err = analyzer.analyze_bulk(&dataset(3)).await.unwrap_err();
        assert_eq!(err.to_string(), "Claude API Error: 500");
        assert_eq!(mock.call_count(), 1);
    }
}
