// crates/quality-gate-cli/src/baseline.rs
// ============================================================================
// Module: QualityGate Baseline Loading
// Description: Reads a `Baseline` JSON file from disk for the `scan`
// subcommand's `--baseline` flag.
// Purpose: Turn an unreadable or malformed baseline file into the
// configuration-error exit code (2), per spec.md §6, instead of a panic.
// Dependencies: quality-gate-core, serde_json
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use quality_gate_core::Baseline;
use serde::Deserialize;

/// On-disk shape of a baseline file: `{ repo, commit, fingerprints: [...] }`.
#[derive(Debug, Deserialize)]
struct BaselineFile {
    /// Repository the baseline was captured for.
    #[serde(default)]
    repo: String,
    /// Commit the baseline was captured at.
    #[serde(default)]
    commit: String,
    /// Accepted finding fingerprints.
    fingerprints: Vec<String>,
}

/// Errors loading a baseline file.
#[derive(Debug, thiserror::Error)]
pub enum BaselineLoadError {
    /// The file could not be read.
    #[error("unable to read baseline file: {0}")]
    Io(String),
    /// The file's contents were not a valid `Baseline` JSON document.
    #[error("unable to parse baseline file: {0}")]
    Parse(String),
}

/// Loads and parses a baseline JSON file from `path`.
///
/// # Errors
/// Returns [`BaselineLoadError`] if `path` cannot be read or does not
/// contain a valid baseline document.
pub fn load_baseline(path: &Path) -> Result<Baseline, BaselineLoadError> {
    let text = std::fs::read_to_string(path).map_err(|err| BaselineLoadError::Io(err.to_string()))?;
    let parsed: BaselineFile = serde_json::from_str(&text).map_err(|err| BaselineLoadError::Parse(err.to_string()))?;
    Ok(Baseline { repo: parsed.repo, commit: parsed.commit, fingerprints: parsed.fingerprints })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load_baseline;

    #[test]
    fn loads_a_well_formed_baseline_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"repo":"r","commit":"HEAD","fingerprints":["abc","def"]}}"#).expect("write");
        let baseline = load_baseline(file.path()).expect("loads");
        assert_eq!(baseline.fingerprints, vec!["abc".to_string(), "def".to_string()]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_baseline(std::path::Path::new("/nonexistent/baseline.json"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "not json").expect("write");
        let result = load_baseline(file.path());
        assert!(result.is_err());
    }
}
