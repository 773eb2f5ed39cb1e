//! Tailoring pipeline — one run from input file to output file.
//!
//! Flow: load résumé → build prompt → one completion call (bounded by the
//! configured timeout) → recover result → write `tailored_resume`.
//!
//! Any failure before the write aborts the run and leaves the output path untouched.

use std::path::PathBuf;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::CompletionService;
use crate::storage::{load_resume, write_tailored_resume};
use crate::tailoring::models::TailoringResult;
use crate::tailoring::prompt_builder::build_prompt;
use crate::tailoring::prompts::SYSTEM_INSTRUCTION;
use crate::tailoring::recovery::recover_result;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct TailoringOutcome {
    pub run_id: Uuid,
    pub result: TailoringResult,
    /// Where the tailored résumé was written. `None` when the reply had no
    /// `tailored_resume`, in which case nothing was written.
    pub written_to: Option<PathBuf>,
}

/// Runs one tailoring request end to end.
pub async fn tailor_resume(
    config: &Config,
    service: &dyn CompletionService,
) -> Result<TailoringOutcome, AppError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("tailor", %run_id);

    async move {
        let resume = load_resume(&config.input_path)?;

        let request = build_prompt(resume, &config.job_description, SYSTEM_INSTRUCTION)?;
        info!(
            "Requesting tailoring from {} ({} prompt bytes)",
            config.model,
            request.text().len()
        );

        let reply = tokio::time::timeout(
            config.request_timeout,
            service.complete(&config.model, request.text()),
        )
        .await
        .map_err(|_| AppError::ServiceTimeout {
            after: config.request_timeout,
        })??;
        info!("Received {} reply bytes", reply.len());

        let result = recover_result(&reply)?;

        let written_to = match &result.tailored_resume {
            Some(tailored) => {
                write_tailored_resume(&config.output_path, tailored)?;
                Some(config.output_path.clone())
            }
            None => {
                warn!(
                    "Reply has no tailored_resume; leaving {} untouched",
                    config.output_path.display()
                );
                None
            }
        };

        Ok::<_, AppError>(TailoringOutcome {
            run_id,
            result,
            written_to,
        })
    }
    .instrument(span)
    .await
}
