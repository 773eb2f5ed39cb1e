//! Response Recoverer — turns the model's raw reply into a `TailoringResult`.
//!
//! Policy is fail-fast: the reply gets one cleaning pass and one strict decode.
//! Nothing is repaired, because a "fixed" reply could carry résumé content the
//! model never produced.

use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::tailoring::models::TailoringResult;

/// Strips formatting noise from a raw reply before decoding.
pub trait ResponseCleaner {
    fn clean<'a>(&self, raw: &'a str) -> std::borrow::Cow<'a, str>;
}

/// Removes the first `json` (case-sensitive) and then any leading or trailing
/// backticks. Handles replies wrapped in a ```` ```json ```` fence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstJsonTagCleaner;

impl ResponseCleaner for FirstJsonTagCleaner {
    fn clean<'a>(&self, raw: &'a str) -> std::borrow::Cow<'a, str> {
        if raw.contains("json") {
            let untagged = raw.replacen("json", "", 1);
            untagged.trim_matches('`').to_string().into()
        } else {
            raw.trim_matches('`').into()
        }
    }
}

/// Recovers a result using the default cleaner.
pub fn recover_result(raw: &str) -> Result<TailoringResult, AppError> {
    recover_result_with(&FirstJsonTagCleaner, raw)
}

/// Recovers a result using `cleaner`.
///
/// Fails with `MalformedResponse` (carrying the cleaned text) when the cleaned
/// reply is not valid JSON or is not a JSON object. Missing fields are not errors.
pub fn recover_result_with<C>(cleaner: &C, raw: &str) -> Result<TailoringResult, AppError>
where
    C: ResponseCleaner + ?Sized,
{
    let cleaned = cleaner.clean(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| AppError::MalformedResponse {
        cleaned: cleaned.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(object) => {
            debug!("Recovered reply object with {} fields", object.len());
            Ok(TailoringResult::from_object(object))
        }
        other => Err(AppError::MalformedResponse {
            cleaned: cleaned.to_string(),
            reason: format!("expected a JSON object, found {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailoring::models::{MatchScore, ResumeDocument, ScoreField};
    use serde_json::json;
    use std::borrow::Cow;

    #[test]
    fn test_clean_text_passes_through_unchanged() {
        let input = r#"{"a": 1, "b": [true, null]}"#;
        assert_eq!(FirstJsonTagCleaner.clean(input), input);
        assert!(matches!(FirstJsonTagCleaner.clean(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_fenced_reply_with_json_tag_is_recovered() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(FirstJsonTagCleaner.clean(raw), "\n{\"a\":1}\n");

        let result = recover_result(raw).unwrap();
        assert_eq!(result, TailoringResult::default());

        let value: Value = serde_json::from_str(&FirstJsonTagCleaner.clean(raw)).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_fenced_mapping_reaches_the_result() {
        let raw = "```json\n{\"tailored_resume\":{\"a\":1}}\n```";
        let result = recover_result_with(&FirstJsonTagCleaner, raw).unwrap();
        assert_eq!(result.tailored_resume, Some(ResumeDocument(json!({"a": 1}))));
        assert!(result.match_score_before.is_none());
    }

    #[test]
    fn test_non_numeric_scores_survive_recovery() {
        let raw = r#"{"match_score_before": "high", "match_score_after": "NaN"}"#;
        let result = recover_result(raw).unwrap();
        assert_eq!(result.match_score_before, Some(ScoreField::Raw(json!("high"))));
        assert_eq!(result.match_score_after, Some(ScoreField::Raw(json!("NaN"))));
    }

    #[test]
    fn test_only_the_first_json_occurrence_is_removed() {
        let raw = "```json\n{\"improvements_summary\": \"kept json wording\"}\n```";
        let result = recover_result(raw).unwrap();
        assert_eq!(
            result.improvements_summary.as_deref(),
            Some("kept json wording")
        );
    }

    #[test]
    fn test_json_tag_match_is_case_sensitive() {
        assert_eq!(FirstJsonTagCleaner.clean("```JSON\n{}\n```"), "JSON\n{}\n");
        assert!(matches!(
            recover_result("```JSON\n{}\n```"),
            Err(AppError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_only_backticks_are_trimmed() {
        assert_eq!(FirstJsonTagCleaner.clean("  `{}`  "), "  `{}`  ");
        assert_eq!(FirstJsonTagCleaner.clean("``{}``"), "{}");
    }

    #[test]
    fn test_garbage_fails_with_malformed_response() {
        match recover_result("not json at all {") {
            Err(AppError::MalformedResponse { cleaned, reason }) => {
                assert_eq!(cleaned, "not  at all {");
                assert!(!reason.is_empty());
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_object_is_not_repaired() {
        let raw = "```json\n{\"tailored_resume\": {\"name\": \"Ada\"}\n```";
        assert!(matches!(
            recover_result(raw),
            Err(AppError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        match recover_result("[1, 2, 3]") {
            Err(AppError::MalformedResponse { reason, .. }) => {
                assert!(reason.contains("an array"));
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_full_reply_is_recovered() {
        let raw = r#"```json
{
  "tailored_resume": {"name": "Ada", "skills": ["Python", "Django"]},
  "match_score_before": 45,
  "match_score_after": 80,
  "improvements_summary": "Promoted Django projects."
}
```"#;
        let result = recover_result(raw).unwrap();
        assert_eq!(
            result.tailored_resume,
            Some(ResumeDocument(
                json!({"name": "Ada", "skills": ["Python", "Django"]})
            ))
        );
        assert_eq!(result.match_score_before, Some(ScoreField::Score(MatchScore(45.0))));
        assert_eq!(result.match_score_after, Some(ScoreField::Score(MatchScore(80.0))));
    }

    struct IdentityCleaner;

    impl ResponseCleaner for IdentityCleaner {
        fn clean<'a>(&self, raw: &'a str) -> Cow<'a, str> {
            Cow::Borrowed(raw)
        }
    }

    #[test]
    fn test_alternative_cleaner_can_be_swapped_in() {
        let raw = "```json\n{}\n```";
        assert!(recover_result(raw).is_ok());
        assert!(matches!(
            recover_result_with(&IdentityCleaner, raw),
            Err(AppError::MalformedResponse { .. })
        ));
    }
}
