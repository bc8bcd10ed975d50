// crates/quality-gate-cli/src/report_store.rs
// ============================================================================
// Module: QualityGate Report Store
// Description: JSON-lines file-backed `ReportStore` adapter.
// Purpose: Give `persist` somewhere to write when no document-store crate
// is in scope for this repository (see DESIGN.md's Open Question note).
// Dependencies: quality-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Each call to [`JsonLinesReportStore::persist`] assigns the scan a fresh
//! [`ScanId`] and appends one JSON line to the configured file, creating it
//! if necessary. This is test/default infrastructure, not a scalability
//! claim, the same framing the workspace already applies to its other
//! in-memory/file adapters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use quality_gate_core::ReportStore;
use quality_gate_core::ReportStoreError;
use quality_gate_core::Scan;
use quality_gate_core::ScanId;

/// Appends persisted scans as JSON lines to a file.
pub struct JsonLinesReportStore {
    /// Path of the JSON-lines file; serialized writes go through this lock
    /// so concurrent `persist` calls do not interleave lines.
    path: Mutex<PathBuf>,
}

impl JsonLinesReportStore {
    /// Builds a store that appends to `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path: Mutex::new(path) }
    }
}

impl ReportStore for JsonLinesReportStore {
    fn persist(&self, scan: &Scan) -> Result<String, ReportStoreError> {
        let id = ScanId::generate();
        let mut stamped = scan.clone();
        stamped.id = Some(id.clone());

        let line = serde_json::to_string(&stamped).map_err(|err| ReportStoreError::Backend(err.to_string()))?;

        let path = self.path.lock().map_err(|_| ReportStoreError::Backend("report store lock poisoned".to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&*path)
            .map_err(|err| ReportStoreError::Backend(err.to_string()))?;
        writeln!(file, "{line}").map_err(|err| ReportStoreError::Backend(err.to_string()))?;

        Ok(id.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use platform_core::SystemClock;
    use platform_core::Clock;
    use quality_gate_core::ReportStore;
    use quality_gate_core::Scan;

    use super::JsonLinesReportStore;

    #[test]
    fn persist_appends_one_line_per_call() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        let store = JsonLinesReportStore::new(file.path().to_path_buf());
        let scan = Scan::new("repo", "HEAD", SystemClock.now(), Vec::new());

        let first_id = store.persist(&scan).expect("first persist");
        let second_id = store.persist(&scan).expect("second persist");
        assert_ne!(first_id, second_id);

        let contents = std::fs::read_to_string(file.path()).expect("read back");
        assert_eq!(contents.lines().count(), 2);
    }
}
