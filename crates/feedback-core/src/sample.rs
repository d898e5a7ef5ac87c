//! Bounded sampling of feedback entries from a parsed table.
//!
//! Two caps apply. `max_rows_scanned` limits which data rows are looked at
//! at all; `max_entries_analyzed` limits how many of the resulting entries
//! are submitted for analysis.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::columns::ColumnIndexSet;

/// Joins the surviving column values of one row.
pub const VALUE_SEPARATOR: &str = " | ";

/// Joins entries in the submitted sample text.
pub const ENTRY_SEPARATOR: &str = "\n\n---FEEDBACK---\n\n";

static QUOTES_AND_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["\r\n]+"#).expect("static regex"));

/// Limits for building a [`FeedbackSample`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    /// Data rows (header excluded) examined at all.
    pub max_rows_scanned: usize,
    /// Entries joined into the submitted text.
    pub max_entries_analyzed: usize,
    /// Values with this many characters or fewer are discarded.
    pub min_value_chars: usize,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            max_rows_scanned: 50,
            max_entries_analyzed: 25,
            min_value_chars: 10,
        }
    }
}

/// One row's worth of feedback text.
pub type FeedbackEntry = String;

/// Entries extracted from the scanned rows, plus the counts needed to
/// report on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackSample {
    pub entries: Vec<FeedbackEntry>,
    /// Data rows actually examined.
    pub rows_scanned: usize,
    pub max_entries_analyzed: usize,
}

impl FeedbackSample {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that will be submitted.
    pub fn analyzed_count(&self) -> usize {
        self.entries.len().min(self.max_entries_analyzed)
    }

    /// Entries submitted for analysis, in order.
    pub fn analyzed_entries(&self) -> &[FeedbackEntry] {
        &self.entries[..self.analyzed_count()]
    }

    /// The submitted entries joined with [`ENTRY_SEPARATOR`].
    pub fn submission_text(&self) -> String {
        self.analyzed_entries().join(ENTRY_SEPARATOR)
    }
}

/// Build the feedback entry for a single data row, if any value survives.
pub fn build_entry(
    row: &[String],
    columns: &ColumnIndexSet,
    min_value_chars: usize,
) -> Option<FeedbackEntry> {
    let parts: Vec<String> = columns
        .iter()
        .map(|index| row.get(index).map(String::as_str).unwrap_or(""))
        .filter(|value| value.chars().count() > min_value_chars)
        .map(clean_value)
        .collect();

    (!parts.is_empty()).then(|| parts.join(VALUE_SEPARATOR))
}

/// Collapse runs of quotes and line breaks into a single space, then trim.
pub fn clean_value(value: &str) -> String {
    QUOTES_AND_BREAKS.replace_all(value, " ").trim().to_string()
}

/// Scan data rows (the table without its header) and collect entries.
pub fn build_sample(
    data_rows: &[Vec<String>],
    columns: &ColumnIndexSet,
    policy: &SamplingPolicy,
) -> FeedbackSample {
    let rows_scanned = data_rows.len().min(policy.max_rows_scanned);
    let entries = data_rows[..rows_scanned]
        .iter()
        .filter_map(|row| build_entry(row, columns, policy.min_value_chars))
        .collect();

    FeedbackSample {
        entries,
        rows_scanned,
        max_entries_analyzed: policy.max_entries_analyzed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::detect;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn feedback_column() -> ColumnIndexSet {
        detect(&["id", "feedback"])
    }

    #[test]
    fn ten_chars_excluded_eleven_included() {
        let columns = feedback_column();
        assert_eq!(build_entry(&row(&["1", "0123456789"]), &columns, 10), None);
        assert_eq!(
            build_entry(&row(&["1", "0123456789a"]), &columns, 10),
            Some("0123456789a".to_string())
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let columns = feedback_column();
        // 10 chars, 20 bytes
        assert_eq!(build_entry(&row(&["1", "éééééééééé"]), &columns, 10), None);
    }

    #[test]
    fn short_row_yields_no_entry() {
        let columns = feedback_column();
        assert_eq!(build_entry(&row(&["only-one-field-here"]), &columns, 10), None);
    }

    #[test]
    fn multiple_columns_joined_with_pipe() {
        let columns = detect(&["Review", "Rating", "Comment"]);
        let entry = build_entry(
            &row(&["Great product overall", "5", "Shipping was slow though"]),
            &columns,
            10,
        );
        assert_eq!(
            entry.as_deref(),
            Some("Great product overall | Shipping was slow though")
        );
    }

    #[test]
    fn short_values_dropped_from_join() {
        let columns = detect(&["Review", "Comment"]);
        let entry = build_entry(&row(&["ok", "The checkout page froze"]), &columns, 10);
        assert_eq!(entry.as_deref(), Some("The checkout page froze"));
    }

    #[test]
    fn quotes_and_line_breaks_become_spaces() {
        assert_eq!(clean_value("said \"great\" app"), "said  great  app");
        assert_eq!(clean_value("line one\r\nline two"), "line one line two");
        assert_eq!(clean_value("\"quoted whole\""), "quoted whole");
    }

    #[test]
    fn scan_cap_hides_later_rows() {
        let columns = feedback_column();
        let mut rows: Vec<Vec<String>> = (0..50).map(|i| row(&[&i.to_string(), "short"])).collect();
        rows.push(row(&["50", "this row is beyond the scan limit"]));

        let sample = build_sample(&rows, &columns, &SamplingPolicy::default());
        assert_eq!(sample.rows_scanned, 50);
        assert!(sample.is_empty());
    }

    #[test]
    fn hundred_rows_scan_fifty_analyze_twenty_five() {
        let columns = feedback_column();
        let rows: Vec<Vec<String>> = (0..100)
            .map(|i| row(&[&i.to_string(), &format!("feedback entry number {i}")]))
            .collect();

        let sample = build_sample(&rows, &columns, &SamplingPolicy::default());
        assert_eq!(sample.rows_scanned, 50);
        assert_eq!(sample.entries.len(), 50);
        assert_eq!(sample.analyzed_count(), 25);

        let text = sample.submission_text();
        assert_eq!(text.matches(ENTRY_SEPARATOR).count(), 24);
        assert!(text.starts_with("feedback entry number 0"));
        assert!(text.ends_with("feedback entry number 24"));
    }

    #[test]
    fn fewer_entries_than_cap_all_submitted() {
        let columns = feedback_column();
        let rows = vec![
            row(&["1", "the app keeps crashing"]),
            row(&["2", "meh"]),
            row(&["3", "love the new dashboard"]),
        ];
        let sample = build_sample(&rows, &columns, &SamplingPolicy::default());
        assert_eq!(sample.rows_scanned, 3);
        assert_eq!(sample.analyzed_count(), 2);
        assert_eq!(
            sample.submission_text(),
            format!("the app keeps crashing{ENTRY_SEPARATOR}love the new dashboard")
        );
    }

    #[test]
    fn custom_policy_limits() {
        let columns = feedback_column();
        let rows: Vec<Vec<String>> = (0..10).map(|i| row(&[&i.to_string(), "abcdef"])).collect();
        let policy = SamplingPolicy {
            max_rows_scanned: 4,
            max_entries_analyzed: 2,
            min_value_chars: 3,
        };
        let sample = build_sample(&rows, &columns, &policy);
        assert_eq!(sample.rows_scanned, 4);
        assert_eq!(sample.entries.len(), 4);
        assert_eq!(sample.analyzed_entries().len(), 2);
    }

    #[test]
    fn default_policy() {
        let policy = SamplingPolicy::default();
        assert_eq!(policy.max_rows_scanned, 50);
        assert_eq!(policy.max_entries_analyzed, 25);
        assert_eq!(policy.min_value_chars, 10);
    }
}
