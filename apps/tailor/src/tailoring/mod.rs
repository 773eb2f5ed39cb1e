// Résumé tailoring: prompt construction, response recovery, and the run pipeline.
// The model is only reached through llm_client::CompletionService.

pub mod models;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod recovery;
