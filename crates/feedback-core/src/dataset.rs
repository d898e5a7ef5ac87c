//! Bulk input preparation: CSV text in, validated sample out.

use chrono::Utc;

use crate::analysis::{BulkMetadata, CsvStructure};
use crate::columns::{self, ColumnIndexSet};
use crate::csv;
use crate::errors::AnalysisError;
use crate::sample::{self, FeedbackSample, SamplingPolicy};

/// A CSV upload reduced to what the analysis step needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackDataset {
    pub headers: Vec<String>,
    pub columns: ColumnIndexSet,
    /// Data rows in the CSV, header excluded.
    pub total_rows: usize,
    pub sample: FeedbackSample,
}

impl FeedbackDataset {
    /// Names of the detected feedback columns.
    pub fn column_labels(&self) -> Vec<String> {
        columns::column_labels(&self.headers, &self.columns)
    }

    pub fn total_entries(&self) -> usize {
        self.sample.entries.len()
    }

    pub fn explanation(&self) -> String {
        format!(
            "Found feedback in columns: {}. Processed {} valid entries from {} total rows.",
            self.column_labels().join(", "),
            self.total_entries(),
            self.total_rows,
        )
    }

    pub fn analysis_scope(&self) -> String {
        if self.total_entries() < self.total_rows {
            format!(
                "Analyzed {} entries with substantial content from {} total rows",
                self.total_entries(),
                self.total_rows,
            )
        } else {
            format!("Analyzed all {} feedback entries", self.total_entries())
        }
    }

    /// Metadata describing this dataset, stamped with the current time.
    pub fn metadata(&self) -> BulkMetadata {
        BulkMetadata {
            total_entries: self.total_entries(),
            total_rows_in_csv: self.total_rows,
            sample_analyzed: self.sample.analyzed_count(),
            csv_structure: CsvStructure {
                explanation: self.explanation(),
                detected_columns: self.columns.clone(),
                headers: self.headers.clone(),
            },
            processing_date: Utc::now(),
            analysis_scope: self.analysis_scope(),
        }
    }
}

/// Parse CSV text, detect feedback columns and build the bounded sample.
///
/// Fails with a validation error when the text is blank, when there is no
/// data row after the header, or when no scanned row yields an entry.
pub fn prepare_dataset(
    csv_text: &str,
    policy: &SamplingPolicy,
) -> Result<FeedbackDataset, AnalysisError> {
    if csv_text.trim().is_empty() {
        return Err(AnalysisError::validation("No CSV data provided"));
    }

    let mut table = csv::parse(csv_text);
    if table.len() < 2 {
        return Err(AnalysisError::validation_with_details(
            "CSV file appears to be empty or has insufficient data",
            "Please ensure your CSV has at least a header row and one data row.",
        ));
    }

    let headers = table.remove(0);
    let feedback_columns = columns::detect(&headers);
    let sample = sample::build_sample(&table, &feedback_columns, policy);

    if sample.is_empty() {
        let checked = columns::column_labels(&headers, &feedback_columns).join(", ");
        return Err(AnalysisError::validation_with_details(
            "No valid feedback found in CSV",
            format!(
                "Checked columns: {checked}. Ensure these columns contain substantial text \
                 content (more than {} characters).",
                policy.min_value_chars
            ),
        ));
    }

    Ok(FeedbackDataset {
        headers,
        columns: feedback_columns,
        total_rows: table.len(),
        sample,
    })
}
