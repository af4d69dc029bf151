//! Configuration settings for Skriv.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub discovery: DiscoverySettings,
    pub engine: EngineSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where transcript artifacts are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "transcriptions".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Audio discovery settings.
///
/// Files directly under `audio_root` carry `root_label`; each subfolder's
/// name doubles as its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Root directory containing the audio library.
    pub audio_root: String,
    /// Label for files found directly under the root.
    pub root_label: String,
    /// Ordered list of named subfolders to scan.
    pub subfolders: Vec<String>,
    /// Audio file extensions to pick up (case-insensitive, no leading dot).
    pub extensions: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            audio_root: "audio-source-files".to_string(),
            root_label: "120wpm".to_string(),
            subfolders: vec![
                "20wpm".to_string(),
                "40wpm".to_string(),
                "50wpm".to_string(),
                "60wpm".to_string(),
                "80wpm".to_string(),
                "100wpm".to_string(),
                "120wpm".to_string(),
            ],
            extensions: vec!["mp3".to_string()],
        }
    }
}

/// Transcription engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Engine binary to invoke.
    pub binary: String,
    /// Model size passed to the engine (tiny, base, small, medium, large).
    pub model: String,
    /// Device passed to the engine.
    pub device: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            binary: "whisper".to_string(),
            model: "medium".to_string(),
            device: "cpu".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SkrivError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skriv")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Get the expanded audio root path.
    pub fn audio_root(&self) -> PathBuf {
        Self::expand_path(&self.discovery.audio_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.output_dir, "transcriptions");
        assert_eq!(settings.discovery.audio_root, "audio-source-files");
        assert_eq!(settings.discovery.root_label, "120wpm");
        assert_eq!(settings.discovery.subfolders.len(), 7);
        assert_eq!(settings.discovery.extensions, vec!["mp3"]);
        assert_eq!(settings.engine.binary, "whisper");
        assert_eq!(settings.engine.model, "medium");
        assert_eq!(settings.engine.device, "cpu");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [engine]
            model = "small"
            "#,
        )
        .unwrap();
        assert_eq!(settings.engine.model, "small");
        assert_eq!(settings.engine.binary, "whisper");
        assert_eq!(settings.general.output_dir, "transcriptions");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.engine.model = "large".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.engine.model, "large");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/skriv/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.engine.model, "medium");
    }
}
