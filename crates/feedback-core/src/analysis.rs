//! Typed analysis results.
//!
//! Field names on the wire are camelCase. Model replies are decoded straight
//! into these types; anything that does not fit is rejected rather than
//! passed through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::columns::ColumnIndexSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallSentiment {
    #[serde(alias = "positive", alias = "POSITIVE")]
    Positive,
    #[serde(alias = "negative", alias = "NEGATIVE")]
    Negative,
    #[serde(alias = "mixed", alias = "MIXED")]
    Mixed,
    #[serde(alias = "neutral", alias = "NEUTRAL")]
    Neutral,
}

/// Sentiment label plus percentage split.
///
/// Percentages keep the model's number representation, so `90` is written
/// back as `90` and `33.5` as `33.5`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub overall: OverallSentiment,
    #[serde(default = "zero")]
    pub positive: Number,
    #[serde(default = "zero")]
    pub negative: Number,
    #[serde(default = "zero")]
    pub neutral: Number,
}

fn zero() -> Number {
    Number::from(0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[serde(alias = "High", alias = "HIGH")]
    High,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "Low", alias = "LOW")]
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Critical", alias = "CRITICAL")]
    Critical,
    #[serde(alias = "Major", alias = "MAJOR")]
    Major,
    #[serde(alias = "Minor", alias = "MINOR")]
    Minor,
}

/// One issue raised by a single piece of feedback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub category: String,
    pub description: String,
    pub priority: Priority,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleAnalysis {
    pub sentiment: Sentiment,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A recurring theme across many feedback entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueCategory {
    pub category: String,
    pub description: String,
    pub priority: Priority,
    pub severity: Severity,
    #[serde(default)]
    pub frequency: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub low: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvStructure {
    pub explanation: String,
    pub detected_columns: ColumnIndexSet,
    pub headers: Vec<String>,
}

/// Facts about the bulk input, attached by the server, never by the model.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMetadata {
    /// Valid entries found in the scanned rows.
    pub total_entries: usize,
    /// All data rows in the CSV, scanned or not.
    #[serde(rename = "totalRowsInCSV")]
    pub total_rows_in_csv: usize,
    pub sample_analyzed: usize,
    pub csv_structure: CsvStructure,
    pub processing_date: DateTime<Utc>,
    pub analysis_scope: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAnalysis {
    pub aggregate_sentiment: Sentiment,
    #[serde(default)]
    pub issue_categories: Vec<IssueCategory>,
    #[serde(default)]
    pub strategic_recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_breakdown: Option<PriorityBreakdown>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BulkMetadata>,
}

/// Result of either analysis flavor, serialized without a tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Single(SingleAnalysis),
    Bulk(BulkAnalysis),
}

impl From<SingleAnalysis> for AnalysisResult {
    fn from(analysis: SingleAnalysis) -> Self {
        Self::Single(analysis)
    }
}

impl From<BulkAnalysis> for AnalysisResult {
    fn from(analysis: BulkAnalysis) -> Self {
        Self::Bulk(analysis)
    }
}
