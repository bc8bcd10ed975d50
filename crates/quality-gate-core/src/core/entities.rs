// crates/quality-gate-core/src/core/entities.rs
// ============================================================================
// Module: QualityGate Entities
// Description: Finding, Scan, Baseline, and Waiver domain types.
// Purpose: Carry the scan-and-verdict domain's invariants independent of
// any detector, store, or CLI concern.
// Dependencies: platform-core, serde
// ============================================================================

//! ## Overview
//! `Finding::fingerprint` is the identity used for baseline comparison and
//! waiver matching. It hashes a fixed-order, field-labeled string rather
//! than JSON, so the same five fields always produce the same digest
//! regardless of how a caller happened to order them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use platform_core::Severity;
use platform_core::Timestamp;
use platform_core::sha256_hex;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::FindingId;
use crate::core::identifiers::ScanId;
use crate::core::identifiers::WaiverId;

/// Field separator used when building a finding's fingerprint pre-image.
///
/// ASCII unit separator: vanishingly unlikely to appear in a rule id,
/// message, or path, so concatenated fields cannot collide across a
/// boundary.
const FINGERPRINT_FIELD_SEP: char = '\u{1f}';

// ============================================================================
// SECTION: Finding
// ============================================================================

/// A single detector finding.
///
/// # Invariants
/// - `id` is `None` until a store assigns one; the domain never assigns it.
/// - `fingerprint()` depends only on `rule_id`, `message`, `severity`,
///   `path`, and `line`; two findings equal on those five fields always
///   fingerprint identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Store-assigned identifier, absent until persisted.
    pub id: Option<FindingId>,
    /// Rule or detector code that produced this finding (for example `ruff-F401`).
    pub rule_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Repository-relative path the finding applies to, if any.
    pub path: Option<String>,
    /// One-based line number within `path`, if any.
    pub line: Option<u32>,
    /// Free-form detector-specific metadata.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Finding {
    /// Builds a finding with no store id and empty `extra`.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        path: Option<String>,
        line: Option<u32>,
    ) -> Self {
        Self {
            id: None,
            rule_id: rule_id.into(),
            message: message.into(),
            severity,
            path,
            line,
            extra: BTreeMap::new(),
        }
    }

    /// Computes the deterministic identity used for baseline and waiver
    /// matching: `SHA256` of `rule_id`, `message`, `severity`, `path`
    /// (empty string when absent), and `line` (`0` when absent), joined by
    /// a fixed separator in a fixed field order.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let path = self.path.as_deref().unwrap_or("");
        let line = self.line.unwrap_or(0);
        let preimage = format!(
            "rule_id={rule_id}{sep}message={message}{sep}severity={severity}{sep}path={path}{sep}line={line}",
            rule_id = self.rule_id,
            message = self.message,
            severity = self.severity.as_str(),
            sep = FINGERPRINT_FIELD_SEP,
        );
        sha256_hex(&preimage)
    }
}

/// Maps a rule-prefix code (for example `F401`, `W291`, `S105`) to a
/// severity, per the `F,E -> MEDIUM`; `W,N -> LOW`; `C,R -> LOW`;
/// `S -> HIGH`; unknown -> `LOW` table. Secret-detector findings are always
/// `CRITICAL` and do not go through this mapping.
#[must_use]
pub fn severity_for_rule_prefix(code: &str) -> Severity {
    match code.chars().next() {
        Some('F' | 'E') => Severity::Medium,
        Some('W' | 'N') => Severity::Low,
        Some('C' | 'R') => Severity::Low,
        Some('S') => Severity::High,
        _ => Severity::Low,
    }
}

// ============================================================================
// SECTION: Scan
// ============================================================================

/// A single run of the gate against a repository at a commit.
///
/// # Invariants
/// - `findings` is the full set reported by every detector that ran;
///   nothing is dropped before `summary()`/verdict computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    /// Store-assigned identifier, absent until persisted.
    pub id: Option<ScanId>,
    /// Repository path or name scanned.
    pub repo: String,
    /// Commit or ref scanned.
    pub commit: String,
    /// When the scan was performed.
    pub ts: Timestamp,
    /// Every finding reported by every detector that ran.
    pub findings: Vec<Finding>,
}

impl Scan {
    /// Builds a scan with no store id.
    #[must_use]
    pub fn new(repo: impl Into<String>, commit: impl Into<String>, ts: Timestamp, findings: Vec<Finding>) -> Self {
        Self { id: None, repo: repo.into(), commit: commit.into(), ts, findings }
    }

    /// Returns a per-severity finding count, zero-filled for severities
    /// with no findings.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for severity in [Severity::Info, Severity::Low, Severity::Medium, Severity::High, Severity::Critical] {
            counts.insert(severity.as_str().to_string(), 0);
        }
        for finding in &self.findings {
            counts
                .entry(finding.severity.as_str().to_string())
                .and_modify(|count| *count += 1)
                .or_insert(1);
        }
        counts
    }
}

// ============================================================================
// SECTION: Baseline
// ============================================================================

/// A persisted set of "known, accepted" finding fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// Repository the baseline was captured for.
    pub repo: String,
    /// Commit the baseline was captured at.
    pub commit: String,
    /// Accepted finding fingerprints.
    pub fingerprints: Vec<String>,
}

impl Baseline {
    /// Returns whether `fingerprint` is accepted by this baseline.
    #[must_use]
    pub fn accepts(&self, fingerprint: &str) -> bool {
        self.fingerprints.iter().any(|accepted| accepted == fingerprint)
    }
}

// ============================================================================
// SECTION: Waiver
// ============================================================================

/// An accepted exception for a specific finding fingerprint.
///
/// Waivers are parsed and stored but never consulted by verdict
/// computation: they record an accepted risk decision, not a gate bypass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waiver {
    /// Store-assigned identifier, absent until persisted.
    pub id: Option<WaiverId>,
    /// Fingerprint of the finding this waiver applies to.
    pub finding_fingerprint: String,
    /// Justification recorded by the approver.
    pub justification: String,
    /// Owner accountable for the waived risk.
    pub owner: String,
    /// When the waiver stops applying.
    pub expires_at: Timestamp,
    /// When the waiver was recorded.
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use platform_core::Severity;
    use platform_core::Timestamp;

    use super::Baseline;
    use super::Finding;
    use super::Scan;
    use super::severity_for_rule_prefix;

    #[test]
    fn fingerprint_is_stable_for_equal_fields() {
        let a = Finding::new("r", "m", Severity::High, Some("a.py".to_string()), Some(1));
        let b = Finding::new("r", "m", Severity::High, Some("a.py".to_string()), Some(1));
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_differs_when_a_field_differs() {
        let a = Finding::new("r", "m", Severity::High, Some("a.py".to_string()), Some(1));
        let b = Finding::new("r", "m", Severity::High, Some("a.py".to_string()), Some(2));
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn missing_path_and_line_default_to_empty_and_zero() {
        let with_none = Finding::new("r", "m", Severity::Low, None, None);
        let with_explicit = Finding::new("r", "m", Severity::Low, Some(String::new()), Some(0));
        assert_eq!(with_none.fingerprint(), with_explicit.fingerprint());
    }

    #[test]
    fn summary_zero_fills_every_severity() {
        let scan = Scan::new(
            "repo",
            "HEAD",
            Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("timestamp"),
            vec![Finding::new("r", "m", Severity::High, None, None)],
        );
        let summary = scan.summary();
        assert_eq!(summary.get("HIGH"), Some(&1));
        assert_eq!(summary.get("CRITICAL"), Some(&0));
        assert_eq!(summary.len(), 5);
    }

    #[test]
    fn baseline_accepts_known_fingerprints_only() {
        let baseline = Baseline { repo: "r".to_string(), commit: "HEAD".to_string(), fingerprints: vec!["abc".to_string()] };
        assert!(baseline.accepts("abc"));
        assert!(!baseline.accepts("def"));
    }

    #[test]
    fn rule_prefix_maps_to_documented_severities() {
        assert_eq!(severity_for_rule_prefix("F401"), Severity::Medium);
        assert_eq!(severity_for_rule_prefix("E501"), Severity::Medium);
        assert_eq!(severity_for_rule_prefix("W291"), Severity::Low);
        assert_eq!(severity_for_rule_prefix("N801"), Severity::Low);
        assert_eq!(severity_for_rule_prefix("C901"), Severity::Low);
        assert_eq!(severity_for_rule_prefix("R0913"), Severity::Low);
        assert_eq!(severity_for_rule_prefix("S105"), Severity::High);
        assert_eq!(severity_for_rule_prefix("X999"), Severity::Low);
        assert_eq!(severity_for_rule_prefix(""), Severity::Low);
    }
}
