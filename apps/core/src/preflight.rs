//! Preflight Check System
//!
//! Verifies the input file and the output directory before a run starts,
//! so that a bad setup fails fast and leaves no partial output behind.

use std::fs;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::PipelineConfig;

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
}

impl PreflightReport {
    /// Ok when every check passed, otherwise a configuration error listing the failures
    pub fn into_result(self) -> Result<(), AppError> {
        if self.all_passed {
            return Ok(());
        }
        let failures: Vec<String> = self
            .checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| match &c.details {
                Some(details) => format!("{}: {} ({})", c.name, c.message, details),
                None => format!("{}: {}", c.name, c.message),
            })
            .collect();
        Err(AppError::Config(failures.join("; ")))
    }
}

/// Performs all preflight checks and returns a report
pub fn run_preflight_checks(config: &PipelineConfig) -> PreflightReport {
    info!("Running preflight checks");

    let checks = vec![check_input_file(config), check_output_dir(config)];

    for check in &checks {
        if check.passed {
            info!("  ✅ {} - {}", check.name, check.message);
        } else {
            warn!("  ❌ {} - {}", check.name, check.message);
        }
    }

    let passed = checks.iter().filter(|c| c.passed).count();
    let all_passed = passed == checks.len();
    let summary = format!("{}/{} checks passed", passed, checks.len());

    PreflightReport {
        all_passed,
        checks,
        summary,
    }
}

fn check_input_file(config: &PipelineConfig) -> CheckResult {
    const NAME: &str = "Input file";
    let path = &config.input_path;

    if path.as_os_str().is_empty() {
        return CheckResult::fail(NAME, "No input path configured", None);
    }

    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => CheckResult::fail(
            NAME,
            "Input path is not a regular file",
            Some(path.display().to_string()),
        ),
        Ok(meta) if meta.len() == 0 => {
            CheckResult::fail(NAME, "Input file is empty", Some(path.display().to_string()))
        }
        Ok(meta) => CheckResult::pass(
            NAME,
            &format!("{} ({} bytes)", path.display(), meta.len()),
        ),
        Err(e) => CheckResult::fail(
            NAME,
            "Input file not readable",
            Some(format!("{}: {}", path.display(), e)),
        ),
    }
}

fn check_output_dir(config: &PipelineConfig) -> CheckResult {
    const NAME: &str = "Output directory";
    let dir = &config.output_dir;

    match fs::create_dir_all(dir) {
        Ok(()) => CheckResult::pass(NAME, &dir.display().to_string()),
        Err(e) => CheckResult::fail(
            NAME,
            "Cannot create output directory",
            Some(format!("{}: {}", dir.display(), e)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(dir: &std::path::Path, input: &str) -> PipelineConfig {
        PipelineConfig {
            input_path: dir.join(input),
            output_dir: dir.join("out"),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempdir().unwrap();
        let report = run_preflight_checks(&config_for(dir.path(), "missing.jsonl"));
        assert!(!report.all_passed);
        assert_eq!(report.summary, "1/2 checks passed");
        let err = report.into_result().unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("Input file")));
    }

    #[test]
    fn test_empty_input_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.jsonl"), "").unwrap();
        let report = run_preflight_checks(&config_for(dir.path(), "empty.jsonl"));
        assert!(!report.checks[0].passed);
        assert_eq!(report.checks[0].message, "Input file is empty");
    }

    #[test]
    fn test_valid_setup_passes_and_creates_output_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("sessions.jsonl"), "{}\n").unwrap();
        let config = config_for(dir.path(), "sessions.jsonl");
        let report = run_preflight_checks(&config);
        assert!(report.all_passed);
        assert!(config.output_dir.is_dir());
        assert!(report.into_result().is_ok());
    }
}
