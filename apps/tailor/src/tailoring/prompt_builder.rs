//! Prompt Builder — assembles the single prompt sent to the completion service.

use anyhow::Context;

use crate::errors::AppError;
use crate::tailoring::models::{ResumeDocument, TailoringRequest};
use crate::tailoring::prompts::{CLOSING_INSTRUCTION, JOB_DESCRIPTION_LABEL, RESUME_LABEL};

/// Builds the tailoring prompt.
///
/// Sections, in order: system instruction, résumé label, compact résumé JSON,
/// job description label, job description, closing instruction.
/// Object keys serialize in sorted order, so equal inputs give equal prompts.
/// Lengths are not checked here; an oversized prompt is rejected upstream.
pub fn build_prompt(
    resume: ResumeDocument,
    job_description: &str,
    system_instruction: &str,
) -> Result<TailoringRequest, AppError> {
    let resume_json =
        serde_json::to_string(&resume).context("Failed to serialize resume for the prompt")?;

    Ok(TailoringRequest::new(format!(
        "{system_instruction}\n\n\
         {RESUME_LABEL}\n\n\
         {resume_json}\n\n\
         {JOB_DESCRIPTION_LABEL}\n\n\
         {job_description}\n\n\
         {CLOSING_INSTRUCTION}\n"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailoring::prompts::SYSTEM_INSTRUCTION;
    use serde_json::json;

    fn resume() -> ResumeDocument {
        ResumeDocument(json!({
            "name": "Ada Lovelace",
            "experience": [
                {"company": "Analytical Engines Ltd", "title": "Engineer", "dates": "1842-1843"}
            ],
            "education": {"institution": "Home tutoring"}
        }))
    }

    const JD: &str = "Python Developer with Django and Machine Learning experience.";

    #[test]
    fn test_build_prompt_is_deterministic() {
        let first = build_prompt(resume(), JD, SYSTEM_INSTRUCTION).unwrap();
        let second = build_prompt(resume(), JD, SYSTEM_INSTRUCTION).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let request = build_prompt(resume(), JD, SYSTEM_INSTRUCTION).unwrap();
        let text = request.text();

        let positions: Vec<usize> = [
            SYSTEM_INSTRUCTION,
            RESUME_LABEL,
            "\"name\":\"Ada Lovelace\"",
            JOB_DESCRIPTION_LABEL,
            JD,
            CLOSING_INSTRUCTION,
        ]
        .iter()
        .map(|needle| text.find(needle).expect("section missing from prompt"))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(text.starts_with(SYSTEM_INSTRUCTION));
        assert!(text.trim_end().ends_with("Return JSON only."));
    }

    #[test]
    fn test_resume_is_serialized_compactly() {
        let request = build_prompt(resume(), JD, "S").unwrap();
        let compact = serde_json::to_string(&resume()).unwrap();
        assert!(request.text().contains(&compact));
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_key_order_does_not_change_the_prompt() {
        let a: serde_json::Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"a": 2, "b": 1}"#).unwrap();
        let pa = build_prompt(ResumeDocument(a), JD, "S").unwrap();
        let pb = build_prompt(ResumeDocument(b), JD, "S").unwrap();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_placeholder_like_text_is_left_alone() {
        let jd = "Mention {resume_json} literally";
        let request = build_prompt(ResumeDocument(json!({"x": 1})), jd, "S").unwrap();
        assert!(request.text().contains(jd));
    }

    #[test]
    fn test_system_instruction_carries_the_output_schema() {
        for field in [
            "tailored_resume",
            "match_score_before",
            "match_score_after",
            "improvements_summary",
        ] {
            assert!(SYSTEM_INSTRUCTION.contains(field), "missing {field}");
        }
        assert!(SYSTEM_INSTRUCTION.contains("no trailing commas"));
    }
}
