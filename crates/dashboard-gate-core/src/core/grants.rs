// crates/dashboard-gate-core/src/core/grants.rs
// ============================================================================
// Module: Dashboard Gate Grant Snapshots
// Description: Precomputed capability, entitlement, and feature inputs.
// Purpose: Carry upstream source-of-truth data into a resolution request.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Grant snapshots are computed by upstream systems of record and passed in
//! verbatim. The engine only reads the granted/active/enabled lists; the
//! denied/expired/disabled lists are carried for callers and never consulted.

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::SubjectId;
use crate::core::identifiers::TenantId;

/// Capabilities granted to one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResult {
    /// Subject the capabilities belong to.
    pub subject_id: SubjectId,
    /// Granted capabilities.
    pub capabilities: Vec<String>,
    /// Explicitly denied capabilities (not consulted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied_capabilities: Option<Vec<String>>,
}

/// Entitlements currently active for one tenant.
///
/// # Invariants
/// - `tenant_id` must equal the request context tenant; a mismatch is an
///   isolation fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSnapshot {
    /// Tenant the entitlements belong to.
    pub tenant_id: TenantId,
    /// Active entitlements.
    pub active_entitlements: Vec<String>,
    /// Expired entitlements (not consulted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_entitlements: Option<Vec<String>>,
}

/// Globally toggled feature flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSnapshot {
    /// Enabled features.
    pub enabled_features: Vec<String>,
    /// Disabled features (not consulted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_features: Option<Vec<String>>,
}
