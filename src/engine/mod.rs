//! Transcription engine abstraction.
//!
//! The engine does the actual speech-to-text work; Skriv only invokes it
//! per file and collects the resulting text. The single production backend
//! shells out to the Whisper CLI.

mod whisper_cli;

pub use whisper_cli::WhisperCli;

use crate::error::{Result, SkrivError};
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription engines.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Transcribe one audio file and return the trimmed transcript text.
    ///
    /// Any failure mode of the underlying engine (spawn error, non-zero
    /// exit, missing or empty result) surfaces as an error; the caller
    /// decides whether to continue.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;

    /// Human-readable description of the backend.
    fn describe(&self) -> String;
}

/// One-shot startup capability probe for the engine binary.
///
/// Run once before any work; a missing engine is the only fatal condition
/// in the whole batch.
pub async fn probe(binary: &str) -> Result<()> {
    match tokio::process::Command::new(binary)
        .arg("--help")
        .output()
        .await
    {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(SkrivError::EngineNotFound(format!(
            "{} is installed but not working correctly",
            binary
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SkrivError::EngineNotFound(binary.to_string()))
        }
        Err(e) => Err(SkrivError::EngineNotFound(format!("{}: {}", binary, e))),
    }
}
