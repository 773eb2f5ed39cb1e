mod config;
mod errors;
mod llm_client;
mod report;
mod storage;
mod tailoring;

use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::report::summary_lines;
use crate::tailoring::pipeline::tailor_resume;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration first; logging is not up yet, so report straight to stderr
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr; stdout carries only the run summary
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    let client = match GeminiClient::new(
        config.gemini_api_key.clone(),
        config.api_base_url.clone(),
        config.request_timeout,
    ) {
        Ok(client) => client,
        Err(e) => return report_failure(&AppError::from(e)),
    };
    info!("Completion client initialized (model: {})", config.model);

    match tailor_resume(&config, &client).await {
        Ok(outcome) => {
            info!("Run {} finished", outcome.run_id);
            for line in summary_lines(&outcome) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}

/// Prints a failure as a single `Error:` line. A malformed reply is dumped
/// first so the text the parser rejected can be inspected.
fn report_failure(err: &AppError) -> ExitCode {
    if let AppError::MalformedResponse { cleaned, .. } = err {
        eprintln!("Raw response from the model (after cleaning):");
        eprintln!("{cleaned}");
    }
    debug!("Run failed: {err:?}");
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}
