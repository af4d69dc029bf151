//! Whisper CLI engine backend.
//!
//! Spawns the `whisper` command-line tool per file with a fixed argument
//! shape. The tool writes `<stem>.txt` into a scratch directory; the backend
//! reads that file back and returns the trimmed text, so the driver stays in
//! charge of persisting the real artifact.

use super::Engine;
use crate::config::EngineSettings;
use crate::error::{Result, SkrivError};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

/// Engine backend that shells out to the Whisper CLI.
pub struct WhisperCli {
    binary: String,
    model: String,
    device: String,
}

impl WhisperCli {
    pub fn new(binary: &str, model: &str, device: &str) -> Self {
        Self {
            binary: binary.to_string(),
            model: model.to_string(),
            device: device.to_string(),
        }
    }

    /// Create a backend from engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(&settings.binary, &settings.model, &settings.device)
    }

    /// Create a backend from engine settings with an optional model override.
    pub fn with_model(settings: &EngineSettings, model: Option<&str>) -> Self {
        Self::new(
            &settings.binary,
            model.unwrap_or(&settings.model),
            &settings.device,
        )
    }

    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn run(&self, audio_path: &Path) -> Result<String> {
        let stem = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                SkrivError::InvalidInput(format!("Unusable file name: {}", audio_path.display()))
            })?;

        // The CLI insists on writing its own output file; give it a scratch
        // directory and read the text back from there.
        let scratch = tempfile::tempdir()?;

        debug!("Invoking {} with model {}", self.binary, self.model);
        let output = tokio::process::Command::new(&self.binary)
            .arg(audio_path)
            .args(["--model", &self.model])
            .args(["--output_format", "txt"])
            .arg("--output_dir")
            .arg(scratch.path())
            .args(["--device", &self.device])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SkrivError::EngineNotFound(self.binary.clone())
                } else {
                    SkrivError::Engine(format!("Failed to run {}: {}", self.binary, e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SkrivError::Engine(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let transcript_path = scratch.path().join(format!("{}.txt", stem));
        let text = tokio::fs::read_to_string(&transcript_path)
            .await
            .map_err(|_| {
                SkrivError::Engine(format!(
                    "{} produced no transcript for {}",
                    self.binary,
                    audio_path.display()
                ))
            })?;

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(SkrivError::Engine(format!(
                "Empty transcript for {}",
                audio_path.display()
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl Engine for WhisperCli {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        self.run(audio_path).await
    }

    fn describe(&self) -> String {
        format!(
            "{} (model: {}, device: {})",
            self.binary, self.model, self.device
        )
    }
}
