// crates/dashboard-gate-core/src/core/snapshot.rs
// ============================================================================
// Module: Dashboard Gate Snapshot Model
// Description: Checksummed, optionally time-bounded resolution artifacts.
// Purpose: Define the persisted snapshot and its canonical checksum payload.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`DashboardSnapshot`] is the offline form of a [`ResolvedDashboard`].
//! Its checksum covers exactly the fields of [`SnapshotPayload`]; the
//! snapshot ID, checksum, and expiry are outside the digest.
//!
//! [`ResolvedDashboard`]: crate::core::resolution::ResolvedDashboard

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::Checksum;
use crate::core::identifiers::DashboardId;
use crate::core::identifiers::SectionId;
use crate::core::identifiers::SnapshotId;
use crate::core::identifiers::SubjectId;
use crate::core::identifiers::TenantId;
use crate::core::resolution::HiddenReason;
use crate::core::resolution::ResolvedSection;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Persisted, checksummed resolution result.
///
/// # Invariants
/// - Created once by the snapshot builder and never mutated afterwards; any
///   change to a covered field invalidates `checksum`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Random snapshot identifier.
    pub snapshot_id: SnapshotId,
    /// Dashboard identifier.
    pub dashboard_id: DashboardId,
    /// Subject the resolution was computed for.
    pub subject_id: SubjectId,
    /// Tenant the resolution was computed for.
    pub tenant_id: TenantId,
    /// Visible sections at generation time.
    pub resolved_sections: Vec<ResolvedSection>,
    /// Hidden section IDs at generation time.
    pub hidden_sections: Vec<SectionId>,
    /// Reasons at generation time.
    pub reasons: Vec<HiddenReason>,
    /// Lowercase hex SHA-256 of the canonical payload.
    pub checksum: Checksum,
    /// Evaluation instant used at generation.
    pub evaluation_time: Timestamp,
    /// Expiry instant, when the snapshot is time-bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

impl DashboardSnapshot {
    /// Returns the checksum payload bound to the given evaluation instant.
    #[must_use]
    pub fn payload_at(&self, evaluation_time: Timestamp) -> SnapshotPayload<'_> {
        SnapshotPayload {
            dashboard_id: &self.dashboard_id,
            subject_id: &self.subject_id,
            tenant_id: &self.tenant_id,
            resolved_sections: &self.resolved_sections,
            hidden_sections: &self.hidden_sections,
            reasons: &self.reasons,
            evaluation_time,
        }
    }

    /// Returns true when the snapshot has expired as of `at`.
    #[must_use]
    pub fn is_expired_at(&self, at: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| at > expires_at)
    }
}

// ============================================================================
// SECTION: Checksum Payload
// ============================================================================

/// Exact field set covered by a snapshot checksum.
///
/// Field order here is irrelevant; canonicalization sorts keys.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload<'a> {
    /// Dashboard identifier.
    pub dashboard_id: &'a DashboardId,
    /// Subject identifier.
    pub subject_id: &'a SubjectId,
    /// Tenant identifier.
    pub tenant_id: &'a TenantId,
    /// Visible sections.
    pub resolved_sections: &'a [ResolvedSection],
    /// Hidden section IDs.
    pub hidden_sections: &'a [SectionId],
    /// Hidden reasons.
    pub reasons: &'a [HiddenReason],
    /// Evaluation instant rendered as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub evaluation_time: Timestamp,
}
