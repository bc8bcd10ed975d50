// crates/quality-gate-core/src/runtime/verdict.rs
// ============================================================================
// Module: QualityGate Verdict
// Description: Pass/fail computation over findings, an optional baseline,
// and a severity threshold.
// Purpose: Implement the CRITICAL-short-circuit, baseline-delta, threshold
// algorithm exactly once so the CLI and any future edge agree on it.
// Dependencies: crate::core, platform-core
// ============================================================================

//! ## Overview
//! `VerdictUseCase::evaluate` takes no ports: given findings, an optional
//! baseline, and a `fail_on` threshold it is a pure function. It stays a
//! struct with a method, matching the shape of every other use-case in
//! this workspace, so a caller never needs to special-case "the one that
//! happens to need no adapters."

// ============================================================================
// SECTION: Imports
// ============================================================================

use platform_core::Severity;

use crate::core::Baseline;
use crate::core::Finding;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Pass/fail outcome of a verdict computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictOutcome {
    /// No finding considered crossed the threshold.
    Pass,
    /// At least one finding considered crossed the threshold, or a
    /// `CRITICAL` finding was present.
    Fail,
}

/// Result of evaluating a scan's findings against a threshold and an
/// optional baseline.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Pass or fail.
    pub outcome: VerdictOutcome,
    /// The findings actually considered: all findings when no baseline was
    /// supplied, or only those whose fingerprint is absent from the
    /// baseline otherwise. Always the full set when a `CRITICAL` finding
    /// triggered the short-circuit.
    pub considered: Vec<Finding>,
}

impl Verdict {
    /// Returns whether the outcome is a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self.outcome, VerdictOutcome::Pass)
    }
}

/// Computes the pass/fail verdict for a set of findings.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerdictUseCase;

impl VerdictUseCase {
    /// Builds the use-case. Carries no state; present for symmetry with
    /// every other use-case's constructor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates `findings` against `fail_on`, consulting `baseline` when
    /// supplied.
    ///
    /// Any `CRITICAL` finding fails the verdict immediately, regardless of
    /// baseline. Otherwise, when a baseline is given, only findings whose
    /// fingerprint is not in `baseline.fingerprints` are considered;
    /// without a baseline every finding is considered. The verdict fails
    /// iff a considered finding's severity is at least `fail_on`.
    #[must_use]
    pub fn evaluate(&self, findings: &[Finding], baseline: Option<&Baseline>, fail_on: Severity) -> Verdict {
        if findings.iter().any(|finding| finding.severity == Severity::Critical) {
            return Verdict { outcome: VerdictOutcome::Fail, considered: findings.to_vec() };
        }

        let considered: Vec<Finding> = match baseline {
            Some(baseline) => findings.iter().filter(|finding| !baseline.accepts(&finding.fingerprint())).cloned().collect(),
            None => findings.to_vec(),
        };

        let outcome = if considered.iter().any(|finding| finding.severity >= fail_on) {
            VerdictOutcome::Fail
        } else {
            VerdictOutcome::Pass
        };

        Verdict { outcome, considered }
    }
}

#[cfg(test)]
mod tests {
    use platform_core::Severity;

    use super::Baseline;
    use super::Finding;
    use super::VerdictOutcome;
    use super::VerdictUseCase;

    fn finding(severity: Severity) -> Finding {
        Finding::new("r", "m", severity, Some("a".to_string()), Some(1))
    }

    #[test]
    fn critical_finding_fails_regardless_of_baseline() {
        let baseline = Baseline { repo: "r".to_string(), commit: "HEAD".to_string(), fingerprints: vec![] };
        let verdict = VerdictUseCase::new().evaluate(&[finding(Severity::Critical)], Some(&baseline), Severity::High);
        assert_eq!(verdict.outcome, VerdictOutcome::Fail);
    }

    #[test]
    fn baseline_accepted_finding_passes() {
        let high = finding(Severity::High);
        let baseline = Baseline { repo: "r".to_string(), commit: "HEAD".to_string(), fingerprints: vec![high.fingerprint()] };
        let verdict = VerdictUseCase::new().evaluate(&[high], Some(&baseline), Severity::High);
        assert_eq!(verdict.outcome, VerdictOutcome::Pass);
        assert!(verdict.considered.is_empty());
    }

    #[test]
    fn new_finding_not_in_baseline_fails_at_threshold() {
        let high = finding(Severity::High);
        let baseline = Baseline { repo: "r".to_string(), commit: "HEAD".to_string(), fingerprints: vec![] };
        let verdict = VerdictUseCase::new().evaluate(&[high], Some(&baseline), Severity::High);
        assert_eq!(verdict.outcome, VerdictOutcome::Fail);
    }

    #[test]
    fn below_threshold_without_baseline_passes() {
        let verdict = VerdictUseCase::new().evaluate(&[finding(Severity::Low)], None, Severity::High);
        assert_eq!(verdict.outcome, VerdictOutcome::Pass);
    }

    #[test]
    fn at_or_above_threshold_without_baseline_fails() {
        let verdict = VerdictUseCase::new().evaluate(&[finding(Severity::High)], None, Severity::High);
        assert_eq!(verdict.outcome, VerdictOutcome::Fail);
    }
}
