// crates/dashboard-gate-core/src/core/hashing.rs
// ============================================================================
// Module: Dashboard Gate Canonical Hashing
// Description: RFC 8785 JSON canonicalization and SHA-256 checksums.
// Purpose: Produce order-independent, reproducible snapshot checksums.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Snapshot checksums are the lowercase hex SHA-256 digest of the payload
//! serialized as RFC 8785 canonical JSON: object keys are sorted at every
//! nesting level, array order is preserved, and output is UTF-8.
//!
//! Security posture: a checksum detects corruption and naive edits only.
//! Anyone holding a snapshot can recompute a self-consistent digest for
//! arbitrary content; there is no key or signature involved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Checksum
// ============================================================================

/// Lowercase hex SHA-256 checksum carried by dashboard snapshots.
///
/// # Invariants
/// - Values produced by this module are 64 lowercase hex characters.
/// - Deserialized values are not validated; a malformed value simply fails
///   verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Wraps a raw checksum string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical hashes.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Returns canonical JSON bytes for a serializable value using RFC 8785.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Computes the SHA-256 checksum of a value's canonical JSON form.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn checksum_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Checksum, HashError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(sha256_checksum(&bytes))
}

/// Computes the SHA-256 checksum of raw bytes.
#[must_use]
pub fn sha256_checksum(bytes: &[u8]) -> Checksum {
    let digest = Sha256::digest(bytes);
    let hex = digest.iter().fold(String::with_capacity(digest.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    });
    Checksum(hex)
}
