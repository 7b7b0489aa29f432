// crates/dashboard-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared declarations, contexts, and grants for core tests.
// Purpose: Keep resolver and snapshot tests on one consistent fixture set.
// Dependencies: dashboard-gate-core
// ============================================================================

//! ## Overview
//! Builders for a four-section dashboard whose sections each exercise one
//! requirement axis, plus a tenant admin context and matching grants.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Mutex;

use dashboard_gate_core::AuditSink;
use dashboard_gate_core::DashboardContext;
use dashboard_gate_core::DashboardDeclaration;
use dashboard_gate_core::DashboardId;
use dashboard_gate_core::EntitlementSnapshot;
use dashboard_gate_core::FeatureSnapshot;
use dashboard_gate_core::PermissionResult;
use dashboard_gate_core::ResolutionAuditEvent;
use dashboard_gate_core::Section;
use dashboard_gate_core::SnapshotAuditEvent;
use dashboard_gate_core::SubjectId;
use dashboard_gate_core::SubjectType;
use dashboard_gate_core::TenantId;
use dashboard_gate_core::Timestamp;

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Evaluation instant shared by the fixtures.
pub fn evaluation_time() -> Timestamp {
    Timestamp::parse("2025-01-19T12:00:00Z").unwrap()
}

/// Converts string slices into owned grant names.
pub fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// Creates a section with one required capability.
pub fn section_with_capability(id: &str, label: &str, capability: &str) -> Section {
    Section {
        required_capabilities: Some(names(&[capability])),
        ..Section::new(id, label)
    }
}

/// Four sections, one per requirement axis plus an unrestricted one.
pub fn declaration() -> DashboardDeclaration {
    DashboardDeclaration {
        dashboard_id: DashboardId::new("test-dashboard"),
        label: "Test Dashboard".to_string(),
        allowed_subjects: vec![SubjectType::TenantAdmin, SubjectType::Staff],
        allowed_tenants: None,
        allowed_partners: None,
        required_capabilities: None,
        required_entitlements: None,
        required_features: None,
        sections: vec![
            section_with_capability("section-1", "Section 1", "dashboard:view"),
            Section {
                required_entitlements: Some(names(&["premium"])),
                ..Section::new("section-2", "Section 2")
            },
            Section {
                required_features: Some(names(&["beta-feature"])),
                ..Section::new("section-3", "Section 3")
            },
            Section::new("section-4", "Section 4"),
        ],
    }
}

/// Tenant admin request against `tenant-abc`.
pub fn context() -> DashboardContext {
    DashboardContext {
        subject_id: SubjectId::new("user-123"),
        subject_type: SubjectType::TenantAdmin,
        tenant_id: TenantId::new("tenant-abc"),
        partner_id: None,
        roles: names(&["admin"]),
        evaluation_time: evaluation_time(),
    }
}

/// Permissions granting view and edit.
pub fn permissions() -> PermissionResult {
    PermissionResult {
        subject_id: SubjectId::new("user-123"),
        capabilities: names(&["dashboard:view", "dashboard:edit"]),
        denied_capabilities: None,
    }
}

/// Entitlements for `tenant-abc`.
pub fn entitlements() -> EntitlementSnapshot {
    EntitlementSnapshot {
        tenant_id: TenantId::new("tenant-abc"),
        active_entitlements: names(&["basic", "premium"]),
        expired_entitlements: None,
    }
}

/// Enabled feature flags.
pub fn features() -> FeatureSnapshot {
    FeatureSnapshot {
        enabled_features: names(&["beta-feature", "analytics"]),
        disabled_features: None,
    }
}

// ============================================================================
// SECTION: Recording Audit Sink
// ============================================================================

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    /// Captured resolution events.
    pub resolutions: Mutex<Vec<ResolutionAuditEvent>>,
    /// Captured snapshot events.
    pub snapshots: Mutex<Vec<SnapshotAuditEvent>>,
}

impl AuditSink for RecordingAuditSink {
    fn record_resolution(&self, event: &ResolutionAuditEvent) {
        self.resolutions.lock().unwrap().push(event.clone());
    }

    fn record_snapshot(&self, event: &SnapshotAuditEvent) {
        self.snapshots.lock().unwrap().push(event.clone());
    }
}
