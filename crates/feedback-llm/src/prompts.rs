//! Prompt templates sent to the model.

use feedback_core::dataset::FeedbackDataset;

/// Output budget for a single-feedback analysis.
pub const SINGLE_MAX_TOKENS: u32 = 1200;
/// Output budget for an aggregate analysis.
pub const BULK_MAX_TOKENS: u32 = 2500;

const SINGLE_SHAPE: &str = r#"{
    "sentiment": {
        "overall": "Positive|Negative|Mixed|Neutral",
        "positive": number,
        "negative": number,
        "neutral": number
    },
    "issues": [
        {
            "category": "Bug|Feature|Support|Performance|UI|Positive",
            "description": "Brief description",
            "priority": "high|medium|low",
            "severity": "critical|major|minor"
        }
    ],
    "actionItems": [
        "Action 1",
        "Action 2"
    ],
    "summary": "One sentence summary"
}"#;

const BULK_SHAPE_HEAD: &str = r#"{
    "aggregateSentiment": {
        "overall": "Positive|Negative|Mixed|Neutral",
        "positive": 30,
        "negative": 50,
        "neutral": 20
    },
    "issueCategories": [
        {
            "category": "Bug Reports",
            "description": "Technical issues and app crashes",
            "priority": "high",
            "severity": "critical",
            "frequency": 15
        },
        {
            "category": "Feature Requests",
            "description": "Users requesting new functionality",
            "priority": "medium",
            "severity": "minor",
            "frequency": 8
        }
    ],
    "strategicRecommendations": [
        "Address critical stability issues affecting 60% of users",
        "Prioritize mobile app performance improvements",
        "Implement user-requested export functionality"
    ],"#;

const BULK_SHAPE_TAIL: &str = r#"    "priorityBreakdown": {
        "high": 5,
        "medium": 8,
        "low": 3
    }
}"#;

const BULK_FOCUS: &str = "Focus on:
1. Identifying the most common issues and their frequency
2. Categorizing feedback into actionable themes
3. Providing specific, concrete recommendations
4. Highlighting urgent vs. nice-to-have improvements
5. Make percentages add to 100 exactly";

/// Prompt for analyzing one piece of feedback.
pub fn single_feedback_prompt(feedback: &str) -> String {
    format!(
        "Analyze this customer feedback quickly and concisely:\n\n\"{feedback}\"\n\n\
         Respond with JSON only:\n{SINGLE_SHAPE}\n\n\
         Keep descriptions under 15 words. Make percentages add to 100."
    )
}

/// Prompt for an aggregate analysis of a prepared dataset.
pub fn bulk_feedback_prompt(dataset: &FeedbackDataset) -> String {
    let total = dataset.total_entries();
    let columns = dataset.column_labels().join(", ");
    let sample_text = dataset.sample.submission_text();

    format!(
        "Analyze this bulk customer feedback and provide comprehensive aggregate insights.\n\n\
         DATASET INFO:\n\
         - Total feedback entries: {total}\n\
         - Sample size analyzed: {analyzed}\n\
         - Detected feedback columns: {columns}\n\n\
         FEEDBACK SAMPLE:\n{sample_text}\n\n\
         Respond with JSON only:\n{BULK_SHAPE_HEAD}\n    \
         \"executiveSummary\": \"Analysis of {total} feedback entries reveals critical \
         performance issues requiring immediate attention, with users particularly \
         frustrated by app crashes and slow response times.\",\n\
         {BULK_SHAPE_TAIL}\n\n{BULK_FOCUS}",
        analyzed = dataset.sample.analyzed_count(),
    )
}
