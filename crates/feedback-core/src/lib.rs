//! Core types for feedback analysis: CSV tokenizing, feedback column
//! detection, bounded sampling, typed results and the provider seam.

pub mod analysis;
pub mod columns;
pub mod csv;
pub mod dataset;
pub mod errors;
pub mod provider;
pub mod sample;
pub mod security;

pub use analysis::{AnalysisResult, BulkAnalysis, BulkMetadata, SingleAnalysis};
pub use columns::ColumnIndexSet;
pub use dataset::{prepare_dataset, FeedbackDataset};
pub use errors::{AnalysisError, GatewayError};
pub use provider::{CompletionRequest, LlmProvider};
pub use sample::{FeedbackSample, SamplingPolicy};
pub use security::ApiKey;
