//! Locating a JSON object inside free-form model output.

use serde::de::DeserializeOwned;

use feedback_core::errors::AnalysisError;

/// The span from the first `{` to the last `}` in `text`, inclusive.
///
/// Greedy: prose before and after the object is dropped, but two separate
/// objects in one reply yield a span covering both, which then fails to
/// parse. Returns `None` when there is no `{` or no `}` after it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Extract and decode a `T` from a model reply.
///
/// Every failure (no braces, invalid JSON, wrong shape) becomes
/// [`AnalysisError::Format`] carrying a truncated copy of `reply`.
pub fn decode_reply<T: DeserializeOwned>(reply: &str, message: &str) -> Result<T, AnalysisError> {
    let Some(span) = extract_json_object(reply) else {
        tracing::warn!(raw = %reply, "no JSON object found in model reply");
        return Err(AnalysisError::format(message, reply));
    };

    serde_json::from_str(span).map_err(|e| {
        tracing::warn!(error = %e, raw = %reply, "model reply did not decode");
        AnalysisError::format(message, reply)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn strips_surrounding_prose() {
        let reply = "Here you go:\n{\"a\":1}\nThanks";
        assert_eq!(extract_json_object(reply), Some("{\"a\":1}"));
    }

    #[test]
    fn nested_objects_kept_whole() {
        let reply = "```json\n{\"a\":{\"b\":[1,2]}}\n```";
        assert_eq!(extract_json_object(reply), Some("{\"a\":{\"b\":[1,2]}}"));
    }

    #[test]
    fn no_braces_yields_none() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn closing_before_opening_yields_none() {
        assert_eq!(extract_json_object("} nothing {"), None);
    }

    #[test]
    fn greedy_span_covers_two_objects() {
        let reply = "{\"a\":1} and {\"b\":2}";
        assert_eq!(extract_json_object(reply), Some(reply));
        assert!(decode_reply::<Value>(reply, "bad").is_err());
    }

    #[test]
    fn decode_reply_parses_value() {
        let value: Value = decode_reply("Sure! {\"a\": 1} Done.", "bad").unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn decode_reply_without_json_keeps_raw_text() {
        let err = decode_reply::<Value>("no json at all", "Invalid response format").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Format {
                message: "Invalid response format".into(),
                raw_excerpt: "no json at all".into(),
            }
        );
    }

    #[test]
    fn decode_reply_truncates_long_raw_text() {
        let reply = format!("{{ not json {}", "z".repeat(2000));
        let err = decode_reply::<Value>(&reply, "bad").unwrap_err();
        match err {
            AnalysisError::Format { raw_excerpt, .. } => {
                assert_eq!(raw_excerpt.chars().count(), 500);
                assert!(reply.starts_with(&raw_excerpt));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }
}
