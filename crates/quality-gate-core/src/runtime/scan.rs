// crates/quality-gate-core/src/runtime/scan.rs
// ============================================================================
// Module: QualityGate Scan Orchestration
// Description: Runs every configured detector over a repository and merges
// their findings into one Scan.
// Purpose: Implement "detectors are independent and may run in parallel" so
// one slow or broken detector cannot block the others.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! `ScanUseCase` takes a set of [`Detector`] ports and a [`Clock`], runs
//! every detector against the repository path on its own thread, and
//! merges their findings into one [`Scan`] stamped with the current time.
//! A detector is trusted never to fail (see [`Detector`]'s invariant), so
//! this use-case has no per-detector error path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use platform_core::Clock;

use crate::core::Scan;
use crate::interfaces::Detector;

// ============================================================================
// SECTION: Scan Use-Case
// ============================================================================

/// Orchestrates detector execution and merges their output into a [`Scan`].
pub struct ScanUseCase {
    /// Detectors to run, in no particular order.
    detectors: Vec<Arc<dyn Detector>>,
    /// Clock port used to stamp the resulting scan.
    clock: Arc<dyn Clock>,
}

impl ScanUseCase {
    /// Builds the use-case over the given detectors and clock.
    #[must_use]
    pub fn new(detectors: Vec<Arc<dyn Detector>>, clock: Arc<dyn Clock>) -> Self {
        Self { detectors, clock }
    }

    /// Runs every detector against `repo_path` and returns the merged scan
    /// for `(repo, commit)`.
    #[must_use]
    pub fn scan(&self, repo: &str, commit: &str, repo_path: &str) -> Scan {
        let findings = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .detectors
                .iter()
                .map(|detector| scope.spawn(move || detector.scan(repo_path)))
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_default())
                .collect()
        });

        Scan::new(repo, commit, self.clock.now(), findings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use platform_core::Severity;
    use platform_core::SystemClock;

    use super::ScanUseCase;
    use crate::core::Finding;
    use crate::interfaces::Detector;

    struct StubDetector {
        label: &'static str,
        severity: Severity,
    }

    impl Detector for StubDetector {
        fn name(&self) -> &str {
            self.label
        }

        fn scan(&self, _repo_path: &str) -> Vec<Finding> {
            vec![Finding::new(self.label, "stub finding", self.severity, None, None)]
        }
    }

    #[test]
    fn merges_findings_from_every_detector() {
        let detectors: Vec<Arc<dyn Detector>> = vec![
            Arc::new(StubDetector { label: "one", severity: Severity::Low }),
            Arc::new(StubDetector { label: "two", severity: Severity::High }),
        ];
        let use_case = ScanUseCase::new(detectors, Arc::new(SystemClock));
        let scan = use_case.scan("repo", "HEAD", "/tmp/repo");
        assert_eq!(scan.findings.len(), 2);
        assert_eq!(scan.repo, "repo");
        assert_eq!(scan.commit, "HEAD");
    }

    #[test]
    fn no_detectors_yields_an_empty_scan() {
        let use_case = ScanUseCase::new(Vec::new(), Arc::new(SystemClock));
        let scan = use_case.scan("repo", "HEAD", "/tmp/repo");
        assert!(scan.findings.is_empty());
    }
}
