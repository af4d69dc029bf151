//! Batch command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{format_duration, Output};
use crate::config::Settings;
use crate::discovery;
use crate::driver::{self, ProgressEvent, RunSummary};
use crate::engine::{Engine, WhisperCli};
use anyhow::Result;
use indicatif::ProgressBar;

/// Run the batch command: discover, filter by existing transcripts, and
/// process everything that remains, one file at a time.
pub async fn run_batch(model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(&settings, Operation::Batch).await {
        Output::error(&format!("{}", e));
        Output::info("Run 'skriv doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let engine = WhisperCli::with_model(&settings.engine, model.as_deref());
    Output::info(&format!("Engine: {}", engine.describe()));

    let locations = discovery::source_locations(&settings);
    let (items, missing) = discovery::discover(&locations, &settings.discovery.extensions)?;

    for location in &missing {
        Output::warning(&format!(
            "Source folder not found: {} ({})",
            location.path.display(),
            location.label
        ));
    }

    if items.is_empty() {
        Output::info("No audio files found.");
        return Ok(());
    }

    Output::info(&format!("Found {} audio files", items.len()));
    println!();

    let output_dir = settings.output_dir();
    let mut spinner: Option<ProgressBar> = None;

    let summary = driver::run_batch(&engine, items, &output_dir, |event| match event {
        ProgressEvent::ItemStarted {
            position,
            remaining,
            label,
            file_name,
        } => {
            Output::info(&format!(
                "[{}/{}] Processing: {}/{}",
                position, remaining, label, file_name
            ));
            spinner = Some(Output::spinner("Transcribing..."));
        }
        ProgressEvent::ItemFinished { elapsed, eta } => {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
            Output::success(&format!(
                "  Done in {} | ETA: {}",
                format_duration(elapsed.as_secs_f64()),
                format_duration(eta.as_secs_f64())
            ));
        }
        ProgressEvent::ItemFailed { error } => {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
            Output::error(&format!("  Failed: {}", error));
        }
    })
    .await?;

    if summary.attempted == 0 {
        Output::success("All audio files are already transcribed!");
        return Ok(());
    }

    render_summary(&summary);
    Ok(())
}

fn render_summary(summary: &RunSummary) {
    Output::header("Batch complete");
    Output::kv("Discovered", &summary.discovered.to_string());
    Output::kv("Skipped", &summary.skipped.to_string());
    Output::kv("Succeeded", &summary.succeeded.to_string());
    Output::kv("Failed", &summary.failed.to_string());
    Output::kv(
        "Total time",
        &format_duration(summary.total_elapsed.as_secs_f64()),
    );
    Output::kv("Output", &summary.output_dir.display().to_string());

    if summary.has_failures() {
        println!();
        Output::warning("Some files failed; re-run to retry them.");
    }
}
