use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// `main` turns any of these into a single `Error: ...` line and an exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("The file {} was not found.", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to decode JSON from the file {}: {source}", .path.display())]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Completion service error: {0}")]
    Service(LlmError),

    #[error("Completion service did not respond within {after:?}")]
    ServiceTimeout { after: Duration },

    /// The reply did not decode as a JSON object after noise stripping.
    /// `cleaned` is the exact text the parser saw.
    #[error("Model returned invalid JSON ({reason}). Please check the cleaned response.")]
    MalformedResponse { cleaned: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit status per failure kind, so scripts can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InputNotFound { .. } => 2,
            AppError::InputMalformed { .. } => 3,
            AppError::Service(_) => 4,
            AppError::ServiceTimeout { .. } => 5,
            AppError::MalformedResponse { .. } => 6,
            AppError::Io(_) | AppError::Internal(_) => 1,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout { after } => AppError::ServiceTimeout { after },
            other => AppError::Service(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_message_names_the_path() {
        let err = AppError::InputNotFound {
            path: PathBuf::from("resume.json"),
        };
        assert_eq!(err.to_string(), "The file resume.json was not found.");
    }

    #[test]
    fn test_llm_timeout_maps_to_service_timeout() {
        let err: AppError = LlmError::Timeout {
            after: Duration::from_secs(3),
        }
        .into();
        assert!(matches!(err, AppError::ServiceTimeout { after } if after.as_secs() == 3));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_other_llm_errors_map_to_service() {
        let err: AppError = LlmError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Service(LlmError::Api { status: 403, .. })));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_exit_codes_are_distinct_per_failure_kind() {
        let codes = [
            AppError::InputNotFound {
                path: PathBuf::from("x"),
            }
            .exit_code(),
            AppError::Service(LlmError::EmptyContent).exit_code(),
            AppError::ServiceTimeout {
                after: Duration::from_secs(1),
            }
            .exit_code(),
            AppError::MalformedResponse {
                cleaned: String::new(),
                reason: String::new(),
            }
            .exit_code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|c| *c != 0));
    }
}
