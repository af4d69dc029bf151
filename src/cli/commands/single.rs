//! Single command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{format_duration, Output};
use crate::config::Settings;
use crate::driver;
use crate::engine::{Engine, WhisperCli};
use anyhow::Result;
use std::path::Path;

/// Run the single command: transcribe exactly one file, no discovery and no
/// skip bookkeeping.
pub async fn run_single(file: &str, model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(&settings, Operation::Single).await {
        Output::error(&format!("{}", e));
        Output::info("Run 'skriv doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let engine = WhisperCli::with_model(&settings.engine, model.as_deref());
    Output::info(&format!("Engine: {}", engine.describe()));
    Output::info(&format!("Transcribing: {}", file));

    let spinner = Output::spinner("Transcribing...");
    let result = driver::run_single(&engine, Path::new(file), &settings.output_dir()).await;
    spinner.finish_and_clear();

    match result {
        Ok((artifact, elapsed)) => {
            Output::success(&format!(
                "Transcript saved to {} ({})",
                artifact.display(),
                format_duration(elapsed.as_secs_f64())
            ));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to transcribe: {}", e));
            Err(e.into())
        }
    }
}
