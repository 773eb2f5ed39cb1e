use crate::tailoring::pipeline::TailoringOutcome;

/// Human-readable summary of a successful run, one entry per console line.
/// Absent fields get a "not found" line instead of failing the run.
pub fn summary_lines(outcome: &TailoringOutcome) -> Vec<String> {
    let result = &outcome.result;
    let mut lines = Vec::new();

    match &outcome.written_to {
        Some(path) => lines.push(format!("Tailored resume saved to {}", path.display())),
        None => lines.push("Tailored resume not found in the result; no output written.".to_string()),
    }

    match &result.match_score_before {
        Some(score) => lines.push(format!("Match score before tailoring: {score}")),
        None => lines.push("Match score before tailoring not found in the result.".to_string()),
    }

    match &result.match_score_after {
        Some(score) => lines.push(format!("Match score after tailoring: {score}")),
        None => lines.push("Match score not found in the result.".to_string()),
    }

    match &result.improvements_summary {
        Some(summary) => {
            lines.push("Improvements summary:".to_string());
            lines.push(summary.clone());
        }
        None => lines.push("Improvements summary not found in the result.".to_string()),
    }

    lines
}
