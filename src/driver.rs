//! The sequential batch driver.
//!
//! Coordinates one run: filter out items whose transcript artifact already
//! exists, then invoke the engine strictly sequentially for the rest, one
//! file at a time. A failed item is recorded and the batch moves on; nothing
//! short of a missing engine aborts the run.
//!
//! Outcomes are returned as a structured [`RunSummary`] rather than printed,
//! so callers and tests can assert on counts and per-item status without
//! parsing console output. Rendering lives in the CLI layer, fed through a
//! progress callback.

use crate::discovery::AudioItem;
use crate::engine::Engine;
use crate::error::{Result, SkrivError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Terminal state of one item within a run. No item is retried; no item
/// transitions back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// An artifact with this item's stem already existed.
    Skipped,
    /// The engine returned text and the artifact was written.
    Succeeded,
    /// The engine invocation failed; no artifact was created.
    Failed,
}

/// Per-item record of what happened during a run.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub stem: String,
    pub label: String,
    pub path: PathBuf,
    pub status: ItemStatus,
    pub elapsed: Option<Duration>,
    pub error: Option<String>,
}

/// Structured result of one batch run.
#[derive(Debug)]
pub struct RunSummary {
    pub discovered: usize,
    pub skipped: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_elapsed: Duration,
    pub output_dir: PathBuf,
    pub items: Vec<ItemReport>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Progress notifications emitted while a batch runs. Advisory output only;
/// the ETA has no effect on scheduling.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    ItemStarted {
        /// 1-indexed position within the remaining work list.
        position: usize,
        remaining: usize,
        label: String,
        file_name: String,
    },
    ItemFinished {
        elapsed: Duration,
        /// Remaining items times the running average per-item time.
        eta: Duration,
    },
    ItemFailed {
        error: String,
    },
}

/// Collect the stems of all transcript artifacts in the output directory.
///
/// A missing output directory means nothing is done yet.
pub fn existing_artifacts(output_dir: &Path) -> Result<HashSet<String>> {
    let mut stems = HashSet::new();

    if !output_dir.is_dir() {
        return Ok(stems);
    }

    for entry in std::fs::read_dir(output_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.insert(stem.to_string());
        }
    }

    Ok(stems)
}

/// Run the full batch: filter by existing artifacts, then process the
/// remaining items sequentially in the given order.
///
/// Items sharing a stem with an existing artifact are classified Skipped,
/// including artifacts produced earlier in the same run. Equal stems across
/// source locations therefore collapse onto one artifact; the second item is
/// treated as done even though it was never processed itself.
pub async fn run_batch<E, F>(
    engine: &E,
    items: Vec<AudioItem>,
    output_dir: &Path,
    mut progress: F,
) -> Result<RunSummary>
where
    E: Engine + ?Sized,
    F: FnMut(ProgressEvent),
{
    let run_start = Instant::now();
    std::fs::create_dir_all(output_dir)?;

    let mut done = existing_artifacts(output_dir)?;
    let discovered = items.len();

    let mut reports = Vec::with_capacity(discovered);
    let mut pending = Vec::new();

    for item in items {
        if done.contains(&item.stem) {
            reports.push(skipped_report(&item));
        } else {
            pending.push(item);
        }
    }

    info!(
        "Discovered {} audio files, {} already transcribed, {} remaining",
        discovered,
        reports.len(),
        pending.len()
    );

    let remaining = pending.len();
    let mut succeeded = 0;
    let mut failed = 0;
    let mut success_time = Duration::ZERO;

    for (position, item) in pending.into_iter().enumerate() {
        let position = position + 1;

        // A stem produced earlier in this run marks later duplicates done.
        if done.contains(&item.stem) {
            reports.push(skipped_report(&item));
            continue;
        }

        progress(ProgressEvent::ItemStarted {
            position,
            remaining,
            label: item.label.clone(),
            file_name: item
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| item.stem.clone()),
        });

        let item_start = Instant::now();
        match attempt_item(engine, &item, output_dir).await {
            Ok(()) => {
                let elapsed = item_start.elapsed();
                succeeded += 1;
                success_time += elapsed;
                done.insert(item.stem.clone());

                let average = success_time / succeeded as u32;
                let eta = average * (remaining - position) as u32;
                progress(ProgressEvent::ItemFinished { elapsed, eta });

                reports.push(ItemReport {
                    stem: item.stem,
                    label: item.label,
                    path: item.path,
                    status: ItemStatus::Succeeded,
                    elapsed: Some(elapsed),
                    error: None,
                });
            }
            Err(e) => {
                failed += 1;
                warn!("Transcription failed for {}: {}", item.path.display(), e);
                progress(ProgressEvent::ItemFailed {
                    error: e.to_string(),
                });

                reports.push(ItemReport {
                    stem: item.stem,
                    label: item.label,
                    path: item.path,
                    status: ItemStatus::Failed,
                    elapsed: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let skipped = reports
        .iter()
        .filter(|r| r.status == ItemStatus::Skipped)
        .count();

    Ok(RunSummary {
        discovered,
        skipped,
        attempted: succeeded + failed,
        succeeded,
        failed,
        total_elapsed: run_start.elapsed(),
        output_dir: output_dir.to_path_buf(),
        items: reports,
    })
}

/// Transcribe one caller-specified file, bypassing discovery and the
/// skip-if-done check. Returns the artifact path and elapsed time.
pub async fn run_single<E>(
    engine: &E,
    audio_path: &Path,
    output_dir: &Path,
) -> Result<(PathBuf, Duration)>
where
    E: Engine + ?Sized,
{
    if !audio_path.is_file() {
        return Err(SkrivError::InvalidInput(format!(
            "File not found: {}",
            audio_path.display()
        )));
    }

    let stem = audio_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            SkrivError::InvalidInput(format!("Unusable file name: {}", audio_path.display()))
        })?;

    std::fs::create_dir_all(output_dir)?;

    let start = Instant::now();
    let text = engine.transcribe(audio_path).await?;
    let artifact = write_artifact(output_dir, stem, &text)?;

    Ok((artifact, start.elapsed()))
}

/// Invoke the engine and, only on success, persist the artifact. Failures
/// never leave a partial artifact behind.
async fn attempt_item<E>(engine: &E, item: &AudioItem, output_dir: &Path) -> Result<()>
where
    E: Engine + ?Sized,
{
    let text = engine.transcribe(&item.path).await?;
    write_artifact(output_dir, &item.stem, &text)?;
    Ok(())
}

fn write_artifact(output_dir: &Path, stem: &str, text: &str) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.txt", stem));
    std::fs::write(&path, text.trim())?;
    Ok(path)
}

fn skipped_report(item: &AudioItem) -> ItemReport {
    ItemReport {
        stem: item.stem.clone(),
        label: item.label.clone(),
        path: item.path.clone(),
        status: ItemStatus::Skipped,
        elapsed: None,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted engine for driver tests: returns canned text, fails for
    /// configured stems, and records every invocation.
    struct FakeEngine {
        fail_stems: Vec<String>,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl FakeEngine {
        fn new() -> Self {
            Self::failing_on(&[])
        }

        fn failing_on(stems: &[&str]) -> Self {
            Self {
                fail_stems: stems.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<PathBuf> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Engine for FakeEngine {
        async fn transcribe(&self, audio_path: &Path) -> Result<String> {
            self.calls.lock().unwrap().push(audio_path.to_path_buf());

            let stem = audio_path.file_stem().unwrap().to_str().unwrap();
            if self.fail_stems.iter().any(|s| s == stem) {
                return Err(SkrivError::Engine(format!("scripted failure for {}", stem)));
            }
            Ok(format!("  transcript of {}  ", stem))
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn item(dir: &Path, label: &str, name: &str) -> AudioItem {
        let path = dir.join(label).join(name);
        AudioItem {
            stem: path
                .file_stem()
                .unwrap()
                .to_str()
                .unwrap()
                .to_string(),
            label: label.to_string(),
            path,
        }
    }

    #[tokio::test]
    async fn test_fresh_run_processes_everything_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let engine = FakeEngine::new();
        let items = vec![
            item(dir.path(), "120wpm", "a.mp3"),
            item(dir.path(), "120wpm", "b.mp3"),
        ];

        let summary = run_batch(&engine, items, &out, |_| {}).await.unwrap();

        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 0);

        let calls = engine.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].ends_with("a.mp3"));
        assert!(calls[1].ends_with("b.mp3"));

        let a = std::fs::read_to_string(out.join("a.txt")).unwrap();
        assert_eq!(a, "transcript of a");
        assert!(out.join("b.txt").is_file());
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let engine = FakeEngine::new();
        let items = vec![
            item(dir.path(), "120wpm", "a.mp3"),
            item(dir.path(), "120wpm", "b.mp3"),
        ];

        run_batch(&engine, items.clone(), &out, |_| {}).await.unwrap();
        let second = run_batch(&engine, items, &out, |_| {}).await.unwrap();

        assert_eq!(second.discovered, 2);
        assert_eq!(second.skipped, 2);
        assert_eq!(second.attempted, 0);
        assert_eq!(engine.calls().len(), 2); // no calls during the second run
    }

    #[tokio::test]
    async fn test_existing_artifact_skips_that_item_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("a.txt"), "earlier run").unwrap();

        let engine = FakeEngine::new();
        let items = vec![
            item(dir.path(), "120wpm", "a.mp3"),
            item(dir.path(), "120wpm", "b.mp3"),
        ];

        let summary = run_batch(&engine, items, &out, |_| {}).await.unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.attempted, 1);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(engine.calls().len(), 1);
        assert!(engine.calls()[0].ends_with("b.mp3"));
        // The pre-existing artifact is left untouched.
        assert_eq!(std::fs::read_to_string(out.join("a.txt")).unwrap(), "earlier run");
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let engine = FakeEngine::failing_on(&["b"]);
        let items = vec![
            item(dir.path(), "120wpm", "a.mp3"),
            item(dir.path(), "120wpm", "b.mp3"),
            item(dir.path(), "120wpm", "c.mp3"),
        ];

        let summary = run_batch(&engine, items, &out, |_| {}).await.unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(engine.calls().len(), 3); // c was still attempted
        assert!(out.join("a.txt").is_file());
        assert!(!out.join("b.txt").exists()); // no partial artifact
        assert!(out.join("c.txt").is_file());

        let b = summary.items.iter().find(|r| r.stem == "b").unwrap();
        assert_eq!(b.status, ItemStatus::Failed);
        assert!(b.error.as_deref().unwrap().contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_duplicate_stem_is_treated_as_already_done() {
        // Two distinct files sharing a stem across labeled subfolders: the
        // second collapses onto the first's artifact and is never processed.
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let engine = FakeEngine::new();
        let items = vec![
            item(dir.path(), "20wpm", "a.mp3"),
            item(dir.path(), "40wpm", "a.mp3"),
        ];

        let summary = run_batch(&engine, items, &out, |_| {}).await.unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(engine.calls().len(), 1);
        assert!(engine.calls()[0].ends_with("20wpm/a.mp3"));

        let skipped = summary
            .items
            .iter()
            .find(|r| r.status == ItemStatus::Skipped)
            .unwrap();
        assert_eq!(skipped.label, "40wpm");
    }

    #[tokio::test]
    async fn test_empty_work_list_is_a_successful_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let engine = FakeEngine::new();

        let summary = run_batch(&engine, Vec::new(), &out, |_| {}).await.unwrap();

        assert_eq!(summary.discovered, 0);
        assert_eq!(summary.attempted, 0);
        assert!(!summary.has_failures());
    }

    #[tokio::test]
    async fn test_progress_events_carry_position_and_eta() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let engine = FakeEngine::new();
        let items = vec![
            item(dir.path(), "120wpm", "a.mp3"),
            item(dir.path(), "120wpm", "b.mp3"),
        ];

        let mut events = Vec::new();
        run_batch(&engine, items, &out, |e| events.push(e))
            .await
            .unwrap();

        assert_eq!(events.len(), 4); // started/finished per item
        match &events[0] {
            ProgressEvent::ItemStarted {
                position,
                remaining,
                file_name,
                ..
            } => {
                assert_eq!(*position, 1);
                assert_eq!(*remaining, 2);
                assert_eq!(file_name, "a.mp3");
            }
            other => panic!("unexpected first event: {:?}", other),
        }
        match &events[3] {
            ProgressEvent::ItemFinished { eta, .. } => {
                assert_eq!(*eta, Duration::ZERO); // nothing left after the last item
            }
            other => panic!("unexpected last event: {:?}", other),
        }
    }

    #[test]
    fn test_existing_artifacts_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let stems = existing_artifacts(&dir.path().join("nope")).unwrap();
        assert!(stems.is_empty());
    }

    #[test]
    fn test_existing_artifacts_only_counts_txt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(dir.path().join("b.srt"), "x").unwrap();

        let stems = existing_artifacts(dir.path()).unwrap();
        assert!(stems.contains("a"));
        assert!(!stems.contains("b"));
    }

    #[tokio::test]
    async fn test_run_single_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("transcriptions");
        let audio = dir.path().join("clip.mp3");
        std::fs::write(&audio, b"audio").unwrap();

        let engine = FakeEngine::new();
        let (artifact, _elapsed) = run_single(&engine, &audio, &out).await.unwrap();

        assert_eq!(artifact, out.join("clip.txt"));
        assert_eq!(
            std::fs::read_to_string(&artifact).unwrap(),
            "transcript of clip"
        );
    }

    #[tokio::test]
    async fn test_run_single_missing_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::new();

        let result = run_single(&engine, &dir.path().join("nope.mp3"), dir.path()).await;
        assert!(matches!(result, Err(SkrivError::InvalidInput(_))));
    }
}
