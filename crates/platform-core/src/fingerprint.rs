// crates/platform-core/src/fingerprint.rs
// ============================================================================
// Module: Platform Fingerprint
// Description: Deterministic SHA-256 hex digest helper.
// Purpose: Give every service one way to turn a pre-image string into a
// stable content fingerprint.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! KnowledgeStore version fingerprints and QualityGate finding fingerprints
//! both reduce to "hash this string, hex-encode the digest". This module
//! owns that one primitive so the hashing choice lives in a single place.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Hashing
// ============================================================================

/// Returns the lowercase hex-encoded SHA-256 digest of `input`.
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::sha256_hex;

    #[test]
    fn hashes_empty_string_to_known_digest() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b85"
        );
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(sha256_hex("alpha|beta"), sha256_hex("alpha|beta"));
    }

    #[test]
    fn distinguishes_different_inputs() {
        assert_ne!(sha256_hex("alpha"), sha256_hex("beta"));
    }
}
