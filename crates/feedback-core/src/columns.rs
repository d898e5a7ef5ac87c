//! Keyword-based detection of free-text feedback columns.

use serde::Serialize;

/// Header vocabulary that marks a column as likely feedback text.
pub const FEEDBACK_KEYWORDS: &[&str] = &[
    "feedback",
    "comment",
    "review",
    "text",
    "message",
    "description",
    "note",
    "remarks",
    "opinion",
    "thoughts",
    "experience",
    "issue",
    "complaint",
    "suggestion",
    "recommendation",
    "testimonial",
];

/// Zero-based column indices selected for feedback extraction.
///
/// Never empty: construction goes through [`detect`], which falls back to the
/// first column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnIndexSet(Vec<usize>);

impl ColumnIndexSet {
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

/// Lowercase and keep only `a..=z`.
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Whether a header looks like a feedback column.
///
/// The substring test runs both ways, so a very short header such as `"Re"`
/// matches `recommendation`, and a header with no letters at all matches
/// every keyword.
pub fn is_feedback_header(header: &str) -> bool {
    let normalized = normalize_header(header);
    FEEDBACK_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword) || keyword.contains(normalized.as_str()))
}

/// Select feedback columns from a header row, in header order.
/// Falls back to `{0}` when nothing matches.
pub fn detect<S: AsRef<str>>(headers: &[S]) -> ColumnIndexSet {
    let detected: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| is_feedback_header(header.as_ref()))
        .map(|(index, _)| index)
        .collect();

    if detected.is_empty() {
        ColumnIndexSet(vec![0])
    } else {
        ColumnIndexSet(detected)
    }
}

/// Display names for the selected columns: the header text, or `Column {i}`
/// when the header is missing or blank.
pub fn column_labels<S: AsRef<str>>(headers: &[S], columns: &ColumnIndexSet) -> Vec<String> {
    columns
        .iter()
        .map(|index| match headers.get(index).map(|header| header.as_ref()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Column {index}"),
        })
        .collect()
}
