// crates/quality-gate-cli/src/detectors.rs
// ============================================================================
// Module: QualityGate Built-in Detectors
// Description: Lint, format, and secret detectors backed by external tools.
// Purpose: Concrete `Detector` adapters; never fail, degrade to a
// self-describing Finding on timeout, missing binary, or parse failure.
// Dependencies: quality-gate-core, platform-core, serde_json
// ============================================================================

//! ## Overview
//! Each detector here shells out to a well-known external tool (`ruff`,
//! `black`, `detect-secrets`) and translates its output into
//! [`quality_gate_core::Finding`]s. None of them ever return an `Err`: a
//! missing binary, a timeout, or output this module cannot parse all
//! become a single low-severity finding describing the failure, so one
//! broken detector never aborts a scan.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::Command;

use platform_core::Severity;
use quality_gate_core::Detector;
use quality_gate_core::Finding;
use quality_gate_core::severity_for_rule_prefix;

use crate::process_runner::DETECTOR_TIMEOUT;
use crate::process_runner::DetectorRunError;
use crate::process_runner::run_with_timeout;

/// Builds the self-describing finding for a detector that failed to run,
/// shared across every built-in detector so the wording and severities
/// stay consistent.
fn failure_finding(prefix: &str, error: &DetectorRunError) -> Finding {
    match error {
        DetectorRunError::TimedOut => {
            Finding::new(format!("{prefix}-timeout"), format!("{prefix} scanner timed out"), Severity::Medium, None, None)
        }
        DetectorRunError::NotFound => Finding::new(
            format!("{prefix}-not-found"),
            format!("{prefix} binary not found in PATH"),
            Severity::Info,
            None,
            None,
        ),
        DetectorRunError::Failed(detail) => Finding::new(
            format!("{prefix}-error"),
            format!("{prefix} scanner failed: {detail}"),
            Severity::Medium,
            None,
            None,
        ),
    }
}

// ============================================================================
// SECTION: Lint Detector
// ============================================================================

/// Wire shape of a single `ruff check --output-format=json` entry.
#[derive(Debug, serde::Deserialize)]
struct RuffIssue {
    /// Rule code, for example `F401`.
    code: Option<String>,
    /// Human-readable violation description.
    message: Option<String>,
    /// Path of the file the violation was found in.
    filename: Option<String>,
    /// Source location of the violation.
    #[serde(default)]
    location: RuffLocation,
}

/// Source location nested under a [`RuffIssue`].
#[derive(Debug, Default, serde::Deserialize)]
struct RuffLocation {
    /// One-based line number.
    row: Option<u32>,
}

/// Lint detector backed by `ruff check`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LintDetector;

impl Detector for LintDetector {
    fn name(&self) -> &str {
        "ruff"
    }

    fn scan(&self, repo_path: &str) -> Vec<Finding> {
        let mut command = Command::new("ruff");
        command.args(["check", repo_path, "--output-format=json"]);

        let output = match run_with_timeout(command, DETECTOR_TIMEOUT) {
            Ok(output) => output,
            Err(error) => return vec![failure_finding("ruff", &error)],
        };

        if output.stdout.is_empty() {
            return Vec::new();
        }

        let issues: Vec<RuffIssue> = match serde_json::from_slice(&output.stdout) {
            Ok(issues) => issues,
            Err(err) => {
                return vec![Finding::new("ruff-error", format!("ruff scanner failed: {err}"), Severity::Medium, None, None)];
            }
        };

        issues
            .into_iter()
            .map(|issue| {
                let code = issue.code.unwrap_or_else(|| "unknown".to_string());
                let severity = severity_for_rule_prefix(&code);
                Finding::new(
                    format!("ruff-{code}"),
                    issue.message.unwrap_or_else(|| "Ruff violation".to_string()),
                    severity,
                    issue.filename,
                    issue.location.row,
                )
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Format Detector
// ============================================================================

/// Format detector backed by `black --check`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatDetector;

impl Detector for FormatDetector {
    fn name(&self) -> &str {
        "black"
    }

    fn scan(&self, repo_path: &str) -> Vec<Finding> {
        let mut command = Command::new("black");
        command.args(["--check", repo_path]);

        let output = match run_with_timeout(command, DETECTOR_TIMEOUT) {
            Ok(output) => output,
            Err(error) => return vec![failure_finding("black", &error)],
        };

        if output.status.success() {
            return Vec::new();
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        stderr
            .lines()
            .filter(|line| line.to_lowercase().contains("would reformat"))
            .map(|line| {
                let path = line.split_whitespace().nth(2).map(str::to_string);
                Finding::new("black-format", format!("File would be reformatted: {line}"), Severity::Low, path, None)
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Secrets Detector
// ============================================================================

/// Wire shape of a `detect-secrets scan --all-files` report.
#[derive(Debug, serde::Deserialize)]
struct SecretsReport {
    /// Map of file path to the secrets found within it.
    #[serde(default)]
    results: std::collections::BTreeMap<String, Vec<SecretHit>>,
}

/// A single detected secret within a [`SecretsReport`].
#[derive(Debug, serde::Deserialize)]
struct SecretHit {
    /// Secret type identifier, for example `AWS Access Key`.
    #[serde(rename = "type")]
    kind: Option<String>,
    /// One-based line number the secret was found at.
    line_number: Option<u32>,
}

/// Secrets detector backed by `detect-secrets scan`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretsDetector;

impl Detector for SecretsDetector {
    fn name(&self) -> &str {
        "detect-secrets"
    }

    fn scan(&self, repo_path: &str) -> Vec<Finding> {
        let mut command = Command::new("detect-secrets");
        command.args(["scan", repo_path, "--all-files"]);

        let output = match run_with_timeout(command, DETECTOR_TIMEOUT) {
            Ok(output) => output,
            Err(error) => return vec![failure_finding("secrets", &error)],
        };

        if output.stdout.is_empty() {
            return Vec::new();
        }

        let Ok(report) = serde_json::from_slice::<SecretsReport>(&output.stdout) else {
            return Vec::new();
        };

        report
            .results
            .into_iter()
            .flat_map(|(path, hits)| {
                hits.into_iter().map(move |hit| {
                    let kind = hit.kind.unwrap_or_else(|| "unknown".to_string());
                    Finding::new(
                        format!("secret-{kind}"),
                        format!("Potential secret detected: {kind}"),
                        Severity::Critical,
                        Some(path.clone()),
                        hit.line_number,
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use quality_gate_core::Detector;

    use super::FormatDetector;
    use super::LintDetector;
    use super::SecretsDetector;

    #[test]
    fn detectors_never_panic_on_a_throwaway_path() {
        // Exercises the scan() contract (must return, never panic) without
        // asserting on whether ruff/black/detect-secrets happen to be
        // installed in the environment running this test.
        let _ = LintDetector.scan("/nonexistent/repo/path/for/tests");
        let _ = FormatDetector.scan("/nonexistent/repo/path/for/tests");
        let _ = SecretsDetector.scan("/nonexistent/repo/path/for/tests");
    }
}
