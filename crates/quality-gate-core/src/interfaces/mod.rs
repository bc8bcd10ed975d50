// crates/quality-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: QualityGate Interfaces
// Description: Backend-agnostic ports for detectors and report persistence.
// Purpose: Define the contract surfaces the scan and verdict use-cases
// depend on without embedding any particular tool or document store.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! `Detector` is a capability, not a data source this crate owns: concrete
//! detectors (subprocess-backed lint/format/secret scanners) live in
//! `quality-gate-cli`, the only crate that needs to shell out. `ReportStore`
//! is the same shape for `persist`: this crate ships no concrete store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Finding;
use crate::core::Scan;

// ============================================================================
// SECTION: Detector
// ============================================================================

/// A capability that inspects a repository and reports findings.
///
/// # Invariants
/// - `scan` never fails: a detector that cannot run (missing binary,
///   timeout, unparsable output) reports that condition as a single
///   low-severity, self-describing [`Finding`] instead of propagating an
///   error, so one broken tool never aborts the gate.
pub trait Detector: Send + Sync {
    /// Stable detector name, used for logging and finding attribution.
    fn name(&self) -> &str;

    /// Scans `repo_path` and returns every finding this detector reports.
    fn scan(&self, repo_path: &str) -> Vec<Finding>;
}

// ============================================================================
// SECTION: Report Store
// ============================================================================

/// Errors a [`ReportStore`] implementation may report.
#[derive(Debug, Error)]
pub enum ReportStoreError {
    /// The backend failed to complete the operation.
    #[error("report store backend error: {0}")]
    Backend(String),
}

/// Persistence port for completed scans.
pub trait ReportStore: Send + Sync {
    /// Persists `scan` and returns the store-assigned id.
    ///
    /// # Errors
    /// Returns [`ReportStoreError`] when the backend fails.
    fn persist(&self, scan: &Scan) -> Result<String, ReportStoreError>;
}
