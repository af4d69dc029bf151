//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Skriv Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    // Check the transcription engine
    println!("{}", style("Transcription Engine").bold());
    let engine_check = check_engine(&settings.engine.binary);
    engine_check.print();
    checks.push(engine_check);

    println!();

    // Check directories
    println!("{}", style("Directories").bold());
    let dir_checks = check_directories(settings);
    for check in &dir_checks {
        check.print();
    }
    checks.extend(dir_checks);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Skriv.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Skriv is ready to use.");
    }

    Ok(())
}

/// Check if the engine binary is available.
fn check_engine(binary: &str) -> CheckResult {
    match Command::new(binary).arg("--help").output() {
        Ok(output) if output.status.success() => {
            CheckResult::ok(binary, "installed")
        }
        Ok(_) => CheckResult::error(binary, "installed but not working", install_hint_whisper()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(binary, "not found", install_hint_whisper())
        }
        Err(e) => CheckResult::error(binary, &format!("error: {}", e), install_hint_whisper()),
    }
}

/// Check audio and output directories.
fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let audio_root = settings.audio_root();
    if audio_root.is_dir() {
        results.push(CheckResult::ok(
            "Audio root",
            &format!("{}", audio_root.display()),
        ));
    } else {
        results.push(CheckResult::error(
            "Audio root",
            &format!("{} not found", audio_root.display()),
            "Set discovery.audio_root in the config file, or create the directory",
        ));
    }

    let present = settings
        .discovery
        .subfolders
        .iter()
        .filter(|s| audio_root.join(s).is_dir())
        .count();
    let total = settings.discovery.subfolders.len();
    if present == total {
        results.push(CheckResult::ok(
            "Source subfolders",
            &format!("{}/{} present", present, total),
        ));
    } else {
        results.push(CheckResult::warning(
            "Source subfolders",
            &format!("{}/{} present", present, total),
            "Missing subfolders are skipped with a warning at run time",
        ));
    }

    let output_dir = settings.output_dir();
    if output_dir.is_dir() {
        results.push(CheckResult::ok(
            "Output directory",
            &format!("{}", output_dir.display()),
        ));
    } else {
        results.push(CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", output_dir.display()),
            "Directory will be created on first run",
        ));
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create one at the path shown by 'skriv --help' (--config)",
        )
    }
}

/// Platform-specific install hint for the Whisper CLI.
fn install_hint_whisper() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: pip install -U openai-whisper (or brew install openai-whisper)"
    } else {
        "Install with: pip install -U openai-whisper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_check_engine_missing_binary() {
        let result = check_engine("skriv-test-binary-that-does-not-exist");
        assert_eq!(result.status, CheckStatus::Error);
    }
}
