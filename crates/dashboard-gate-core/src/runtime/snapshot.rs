// crates/dashboard-gate-core/src/runtime/snapshot.rs
// ============================================================================
// Module: Dashboard Gate Snapshot Builder and Verifier
// Description: Snapshot generation, checksum verification, and replay.
// Purpose: Reproduce an access decision offline and detect altered results.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`generate_dashboard_snapshot`] binds a resolution result to its subject,
//! tenant, and evaluation instant under a canonical SHA-256 checksum.
//! Verification recomputes that checksum; evaluation replays the stored result
//! or, once expired, returns an empty result with a synthetic reason.
//!
//! Evaluation does not verify the checksum. Callers that need tamper
//! detection verify first.
//!
//! Security posture: the checksum is not a signature. It catches corruption
//! and naive edits, but anyone can forge a self-consistent snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::DashboardContext;
use crate::core::DashboardDeclaration;
use crate::core::DashboardSnapshot;
use crate::core::HiddenReason;
use crate::core::HiddenReasonCode;
use crate::core::ResolvedDashboard;
use crate::core::SectionId;
use crate::core::SnapshotId;
use crate::core::SnapshotPayload;
use crate::core::TimeError;
use crate::core::Timestamp;
use crate::core::hashing::checksum_canonical_json;
use crate::interfaces::Clock;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while generating or replaying snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Canonical payload could not be hashed.
    #[error("snapshot checksum failed: {0}")]
    Checksum(String),
    /// Expiry instant falls outside the representable range.
    #[error("snapshot expiry of {expires_in_ms} ms is out of range")]
    ExpiryOutOfRange {
        /// Requested duration.
        expires_in_ms: u64,
    },
    /// Requested expiry exceeds the configured ceiling.
    #[error("snapshot expiry of {expires_in_ms} ms exceeds limit of {max_ttl_ms} ms")]
    ExpiryExceedsLimit {
        /// Requested duration.
        expires_in_ms: u64,
        /// Configured ceiling.
        max_ttl_ms: u64,
    },
    /// Clock could not supply the current instant.
    #[error("clock unavailable: {0}")]
    Clock(#[from] TimeError),
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generates a snapshot with a fresh random ID.
///
/// An `expires_in_ms` of `None` or `0` produces a snapshot without expiry.
///
/// # Errors
///
/// Returns [`SnapshotError`] when hashing fails or the expiry overflows.
pub fn generate_dashboard_snapshot(
    declaration: &DashboardDeclaration,
    resolved: &ResolvedDashboard,
    context: &DashboardContext,
    expires_in_ms: Option<u64>,
) -> Result<DashboardSnapshot, SnapshotError> {
    generate_dashboard_snapshot_with_id(
        SnapshotId::generate(),
        declaration,
        resolved,
        context,
        expires_in_ms,
    )
}

/// Generates a snapshot under a caller-chosen ID.
///
/// # Errors
///
/// Returns [`SnapshotError`] when hashing fails or the expiry overflows.
pub fn generate_dashboard_snapshot_with_id(
    snapshot_id: SnapshotId,
    declaration: &DashboardDeclaration,
    resolved: &ResolvedDashboard,
    context: &DashboardContext,
    expires_in_ms: Option<u64>,
) -> Result<DashboardSnapshot, SnapshotError> {
    let expires_at = match expires_in_ms.filter(|millis| *millis > 0) {
        Some(millis) => Some(
            context
                .evaluation_time
                .checked_add_millis(millis)
                .ok_or(SnapshotError::ExpiryOutOfRange {
                    expires_in_ms: millis,
                })?,
        ),
        None => None,
    };

    let payload = SnapshotPayload {
        dashboard_id: &declaration.dashboard_id,
        subject_id: &context.subject_id,
        tenant_id: &context.tenant_id,
        resolved_sections: &resolved.visible_sections,
        hidden_sections: &resolved.hidden_sections,
        reasons: &resolved.reasons,
        evaluation_time: context.evaluation_time,
    };
    let checksum =
        checksum_canonical_json(&payload).map_err(|err| SnapshotError::Checksum(err.to_string()))?;

    Ok(DashboardSnapshot {
        snapshot_id,
        dashboard_id: declaration.dashboard_id.clone(),
        subject_id: context.subject_id.clone(),
        tenant_id: context.tenant_id.clone(),
        resolved_sections: resolved.visible_sections.clone(),
        hidden_sections: resolved.hidden_sections.clone(),
        reasons: resolved.reasons.clone(),
        checksum,
        evaluation_time: context.evaluation_time,
        expires_at,
    })
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Verifies the snapshot checksum against its stored evaluation instant.
#[must_use]
pub fn verify_dashboard_snapshot(snapshot: &DashboardSnapshot) -> bool {
    verify_snapshot_integrity(snapshot, snapshot.evaluation_time)
}

/// Verifies the snapshot checksum as of an externally supplied instant.
///
/// Fails closed: a payload that cannot be canonicalized is reported invalid.
#[must_use]
pub fn verify_snapshot_integrity(snapshot: &DashboardSnapshot, evaluation_time: Timestamp) -> bool {
    checksum_canonical_json(&snapshot.payload_at(evaluation_time))
        .is_ok_and(|checksum| checksum == snapshot.checksum)
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Reproduces a resolution result from a snapshot as of `at`.
///
/// Once `at` is strictly after `expires_at`, the result has no visible
/// sections, keeps the stored hidden IDs, and carries a single
/// `missing_feature` reason keyed by the dashboard ID.
#[must_use]
pub fn evaluate_from_snapshot(snapshot: &DashboardSnapshot, at: Timestamp) -> ResolvedDashboard {
    if let Some(expires_at) = snapshot.expires_at
        && snapshot.is_expired_at(at)
    {
        return ResolvedDashboard {
            dashboard_id: snapshot.dashboard_id.clone(),
            visible_sections: Vec::new(),
            hidden_sections: snapshot.hidden_sections.clone(),
            reasons: vec![HiddenReason {
                section_id: SectionId::new(snapshot.dashboard_id.as_str()),
                reason: HiddenReasonCode::MissingFeature,
                details: format!("Snapshot expired at {expires_at}"),
            }],
        };
    }

    ResolvedDashboard {
        dashboard_id: snapshot.dashboard_id.clone(),
        visible_sections: snapshot.resolved_sections.clone(),
        hidden_sections: snapshot.hidden_sections.clone(),
        reasons: snapshot.reasons.clone(),
    }
}

/// Reproduces a resolution result as of the clock's current instant.
///
/// # Errors
///
/// Returns [`SnapshotError::Clock`] when the clock cannot supply an instant.
pub fn evaluate_from_snapshot_now<C: Clock + ?Sized>(
    snapshot: &DashboardSnapshot,
    clock: &C,
) -> Result<ResolvedDashboard, SnapshotError> {
    Ok(evaluate_from_snapshot(snapshot, clock.now()?))
}
