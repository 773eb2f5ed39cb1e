use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};

/// Job description used when neither `TAILOR_JOB_DESCRIPTION` nor
/// `TAILOR_JOB_DESCRIPTION_FILE` is set.
pub const DEFAULT_JOB_DESCRIPTION: &str = "\
We are looking for a Python Developer with experience in Django and Machine Learning.
The ideal candidate should have strong problem-solving skills and the ability to work in a team.";

pub const DEFAULT_INPUT_PATH: &str = "resume.json";
pub const DEFAULT_OUTPUT_PATH: &str = "tailored_resume.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Run configuration loaded from environment variables (and `.env` if present).
/// Only the API key is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Model identifier sent with every completion request.
    pub model: String,
    pub api_base_url: String,
    /// Source résumé. Never written to.
    pub input_path: PathBuf,
    /// Destination for the tailored résumé. Overwritten without confirmation.
    pub output_path: PathBuf,
    pub job_description: String,
    /// Upper bound on the single completion call.
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let job_description = match (
            lookup("TAILOR_JOB_DESCRIPTION"),
            lookup("TAILOR_JOB_DESCRIPTION_FILE"),
        ) {
            (Some(text), _) => text,
            (None, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read job description from '{path}'"))?,
            (None, None) => DEFAULT_JOB_DESCRIPTION.to_string(),
        };

        let timeout_secs = match lookup("TAILOR_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("TAILOR_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            gemini_api_key: require(&lookup, "GEMINI_API_KEY")?,
            model: lookup("TAILOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base_url: lookup("TAILOR_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            input_path: lookup("TAILOR_INPUT_PATH")
                .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string())
                .into(),
            output_path: lookup("TAILOR_OUTPUT_PATH")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string())
                .into(),
            job_description,
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}
