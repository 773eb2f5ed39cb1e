use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A résumé as read from disk. The schema is not interpreted here: any JSON
/// value is accepted and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeDocument(pub Value);

/// The prompt text for one tailoring call. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailoringRequest {
    text: String,
}

impl TailoringRequest {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Estimated alignment between résumé and job description, nominally 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(pub f64);

impl MatchScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A score field as the model returned it. Finite numbers and numeric strings
/// become `Score`; any other value is kept verbatim in `Raw` so it can still be
/// reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreField {
    Score(MatchScore),
    Raw(Value),
}

impl ScoreField {
    /// Reads a score out of a reply field. Missing and `null` are absent.
    fn from_field(field: &str, value: Option<Value>) -> Option<Self> {
        let value = value?;
        let parsed = match &value {
            Value::Null => return None,
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed.filter(|score| score.is_finite()) {
            Some(score) => {
                if !(MatchScore::MIN..=MatchScore::MAX).contains(&score) {
                    warn!(
                        "{field} = {score} is outside {}–{}",
                        MatchScore::MIN,
                        MatchScore::MAX
                    );
                }
                Some(ScoreField::Score(MatchScore(score)))
            }
            None => {
                warn!("{field} is not a finite number: {value}");
                Some(ScoreField::Raw(value))
            }
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreField::Score(score) => score.fmt(f),
            ScoreField::Raw(Value::String(s)) => f.write_str(s),
            ScoreField::Raw(other) => write!(f, "{other}"),
        }
    }
}

/// Structured reply recovered from the model. Every field may be absent;
/// JSON `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TailoringResult {
    pub tailored_resume: Option<ResumeDocument>,
    pub match_score_before: Option<ScoreField>,
    pub match_score_after: Option<ScoreField>,
    pub improvements_summary: Option<String>,
}

impl TailoringResult {
    /// Extracts the four known fields from a decoded reply object. Unknown
    /// fields are ignored.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let tailored_resume = object
            .remove("tailored_resume")
            .filter(|v| !v.is_null())
            .map(ResumeDocument);

        let match_score_before =
            ScoreField::from_field("match_score_before", object.remove("match_score_before"));
        let match_score_after =
            ScoreField::from_field("match_score_after", object.remove("match_score_after"));

        let improvements_summary = match object.remove("improvements_summary") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };

        Self {
            tailored_resume,
            match_score_before,
            match_score_after,
            improvements_summary,
        }
    }
}
