//! Pre-flight checks before expensive operations.
//!
//! Validates that the transcription engine is available before starting a
//! run that would otherwise fail on the first item. Run once per process,
//! before any work.

use crate::config::Settings;
use crate::engine;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Full discovery and batch loop.
    Batch,
    /// One caller-specified file.
    Single,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub async fn check(settings: &Settings, operation: Operation) -> Result<()> {
    match operation {
        // Both modes invoke the same engine.
        Operation::Batch | Operation::Single => {
            engine::probe(&settings.engine.binary).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkrivError;

    #[tokio::test]
    async fn test_check_fails_for_missing_engine() {
        let mut settings = Settings::default();
        settings.engine.binary = "skriv-test-binary-that-does-not-exist".to_string();

        let result = check(&settings, Operation::Batch).await;
        assert!(matches!(result, Err(SkrivError::EngineNotFound(_))));
    }
}
