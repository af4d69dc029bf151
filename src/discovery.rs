//! Source locations and audio file discovery.
//!
//! Discovery scans the audio root directly plus each configured subfolder,
//! non-recursively, keeping only files whose extension matches the
//! configured list. The combined result is sorted by full path string so
//! processing order is reproducible across runs.

use crate::config::Settings;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One discovery root: the main audio directory or a named subfolder.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub label: String,
}

/// One discovered input file. The stem is the idempotency key: an existing
/// transcript artifact with the same stem marks this item as done.
#[derive(Debug, Clone)]
pub struct AudioItem {
    pub path: PathBuf,
    pub stem: String,
    pub label: String,
}

/// Build the ordered list of source locations from settings: the root first,
/// then each configured subfolder.
pub fn source_locations(settings: &Settings) -> Vec<SourceLocation> {
    let root = settings.audio_root();

    let mut locations = vec![SourceLocation {
        path: root.clone(),
        label: settings.discovery.root_label.clone(),
    }];

    for subfolder in &settings.discovery.subfolders {
        locations.push(SourceLocation {
            path: root.join(subfolder),
            label: subfolder.clone(),
        });
    }

    locations
}

/// Scan every existing source location for matching audio files.
///
/// Returns the discovered items sorted by full path string, plus the
/// locations that do not exist on disk. Missing locations never abort the
/// run; the caller decides how to report them.
pub fn discover(
    locations: &[SourceLocation],
    extensions: &[String],
) -> Result<(Vec<AudioItem>, Vec<SourceLocation>)> {
    let mut items = Vec::new();
    let mut missing = Vec::new();

    for location in locations {
        if !location.path.is_dir() {
            warn!("Source location not found: {}", location.path.display());
            missing.push(location.clone());
            continue;
        }

        let mut found = 0;
        for entry in std::fs::read_dir(&location.path)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !matches_extension(&path, extensions) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping file with unusable name: {}", path.display());
                continue;
            };

            items.push(AudioItem {
                stem: stem.to_string(),
                label: location.label.clone(),
                path,
            });
            found += 1;
        }

        debug!(
            "Found {} audio files in {} ({})",
            found,
            location.path.display(),
            location.label
        );
    }

    items.sort_by(|a, b| {
        a.path
            .to_string_lossy()
            .as_ref()
            .cmp(b.path.to_string_lossy().as_ref())
    });

    Ok((items, missing))
}

/// Case-insensitive extension match against the configured list.
fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|e| e.to_lowercase() == ext)
        })
        .unwrap_or(false)
}
