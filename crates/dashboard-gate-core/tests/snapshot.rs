// crates/dashboard-gate-core/tests/snapshot.rs
// ============================================================================
// Module: Snapshot Tests
// Description: Snapshot generation, checksum verification, and replay.
// ============================================================================
//! ## Overview
//! Validates the canonical checksum against a fixed vector, tamper detection
//! on every bound field, expiry arithmetic, and expired replay behavior.

#![allow(
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

mod common;

use dashboard_gate_core::Checksum;
use dashboard_gate_core::DashboardContext;
use dashboard_gate_core::DashboardDeclaration;
use dashboard_gate_core::DashboardId;
use dashboard_gate_core::DashboardSnapshot;
use dashboard_gate_core::EntitlementSnapshot;
use dashboard_gate_core::FixedClock;
use dashboard_gate_core::HiddenReasonCode;
use dashboard_gate_core::ResolvedDashboard;
use dashboard_gate_core::Section;
use dashboard_gate_core::SectionId;
use dashboard_gate_core::SnapshotError;
use dashboard_gate_core::SnapshotId;
use dashboard_gate_core::SubjectId;
use dashboard_gate_core::SubjectType;
use dashboard_gate_core::TenantId;
use dashboard_gate_core::Timestamp;
use dashboard_gate_core::evaluate_from_snapshot;
use dashboard_gate_core::evaluate_from_snapshot_now;
use dashboard_gate_core::generate_dashboard_snapshot;
use dashboard_gate_core::generate_dashboard_snapshot_with_id;
use dashboard_gate_core::resolve_dashboard;
use dashboard_gate_core::verify_dashboard_snapshot;
use dashboard_gate_core::verify_snapshot_integrity;

use crate::common::features;
use crate::common::names;
use crate::common::permissions;

/// Checksum of the fully visible `snapshot-test` resolution.
const VISIBLE_CHECKSUM: &str = "de43adac25e8f6ebf37515eb1e185775653bf0ac17b5e5d93f1dbdce3a776394";

/// Checksum of the resolution with `section-a` hidden.
const HIDDEN_CHECKSUM: &str = "aa13e0c219840b4c3c65aa78ba6b29c52817499f78dc8c25eeeff54c72aec823";

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn snapshot_declaration() -> DashboardDeclaration {
    DashboardDeclaration {
        dashboard_id: DashboardId::new("snapshot-test"),
        label: "Snapshot Test".to_string(),
        allowed_subjects: vec![SubjectType::TenantAdmin],
        allowed_tenants: None,
        allowed_partners: None,
        required_capabilities: None,
        required_entitlements: None,
        required_features: None,
        sections: vec![
            Section {
                required_entitlements: Some(names(&["premium"])),
                ..Section::new("section-a", "Section A")
            },
            Section::new("section-b", "Section B"),
        ],
    }
}

fn snapshot_context() -> DashboardContext {
    DashboardContext {
        subject_id: SubjectId::new("user-snap-1"),
        subject_type: SubjectType::TenantAdmin,
        tenant_id: TenantId::new("tenant-snap"),
        partner_id: None,
        roles: Vec::new(),
        evaluation_time: Timestamp::parse("2025-01-19T14:00:00.000Z").unwrap(),
    }
}

fn snapshot_entitlements(active: &[&str]) -> EntitlementSnapshot {
    EntitlementSnapshot {
        tenant_id: TenantId::new("tenant-snap"),
        active_entitlements: names(active),
        expired_entitlements: None,
    }
}

fn resolved_with(active: &[&str]) -> ResolvedDashboard {
    resolve_dashboard(
        &snapshot_declaration(),
        &snapshot_context(),
        &permissions(),
        &snapshot_entitlements(active),
        &features(),
    )
    .unwrap()
}

fn snapshot_with(active: &[&str], expires_in_ms: Option<u64>) -> DashboardSnapshot {
    generate_dashboard_snapshot(
        &snapshot_declaration(),
        &resolved_with(active),
        &snapshot_context(),
        expires_in_ms,
    )
    .unwrap()
}

// ============================================================================
// SECTION: Generation
// ============================================================================

#[test]
fn checksum_matches_canonical_vector() {
    let visible = snapshot_with(&["premium"], None);
    assert_eq!(visible.checksum, Checksum::new(VISIBLE_CHECKSUM));

    let hidden = snapshot_with(&[], None);
    assert_eq!(hidden.checksum, Checksum::new(HIDDEN_CHECKSUM));
    assert_eq!(hidden.hidden_sections, vec![SectionId::new("section-a")]);
}

#[test]
fn snapshot_copies_identity_and_result() {
    let snapshot = snapshot_with(&["premium"], None);

    assert_eq!(snapshot.dashboard_id, DashboardId::new("snapshot-test"));
    assert_eq!(snapshot.subject_id, SubjectId::new("user-snap-1"));
    assert_eq!(snapshot.tenant_id, TenantId::new("tenant-snap"));
    assert_eq!(snapshot.resolved_sections.len(), 2);
    assert_eq!(snapshot.evaluation_time.to_iso_string(), "2025-01-19T14:00:00.000Z");
    assert!(snapshot.expires_at.is_none());
    assert_eq!(snapshot.checksum.as_str().len(), 64);
}

#[test]
fn snapshot_ids_are_random_but_checksums_are_stable() {
    let first = snapshot_with(&["premium"], None);
    let second = snapshot_with(&["premium"], None);

    assert_ne!(first.snapshot_id, second.snapshot_id);
    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first.snapshot_id.as_str().len(), 36);
}

#[test]
fn caller_chosen_id_is_kept() {
    let snapshot = generate_dashboard_snapshot_with_id(
        SnapshotId::new("snap-fixed"),
        &snapshot_declaration(),
        &resolved_with(&["premium"]),
        &snapshot_context(),
        None,
    )
    .unwrap();

    assert_eq!(snapshot.snapshot_id.as_str(), "snap-fixed");
    assert_eq!(snapshot.checksum.as_str(), VISIBLE_CHECKSUM);
}

#[test]
fn expiry_is_offset_from_evaluation_time() {
    let snapshot = snapshot_with(&["premium"], Some(3_600_000));

    assert_eq!(snapshot.expires_at.unwrap().to_iso_string(), "2025-01-19T15:00:00.000Z");
}

#[test]
fn zero_expiry_means_no_expiry() {
    let snapshot = snapshot_with(&["premium"], Some(0));

    assert!(snapshot.expires_at.is_none());
}

#[test]
fn overflowing_expiry_is_rejected() {
    let err = generate_dashboard_snapshot(
        &snapshot_declaration(),
        &resolved_with(&["premium"]),
        &snapshot_context(),
        Some(u64::MAX),
    )
    .unwrap_err();

    assert_eq!(
        err,
        SnapshotError::ExpiryOutOfRange {
            expires_in_ms: u64::MAX,
        }
    );
}

// ============================================================================
// SECTION: Verification
// ============================================================================

#[test]
fn untouched_snapshot_verifies() {
    let snapshot = snapshot_with(&["premium"], Some(3_600_000));

    assert!(verify_dashboard_snapshot(&snapshot));
    assert!(verify_snapshot_integrity(&snapshot, snapshot.evaluation_time));
}

#[test]
fn tampered_tenant_fails_verification() {
    let mut snapshot = snapshot_with(&["premium"], None);
    snapshot.tenant_id = TenantId::new("tenant-evil");

    assert!(!verify_dashboard_snapshot(&snapshot));
}

#[test]
fn tampered_sections_fail_verification() {
    let mut snapshot = snapshot_with(&[], None);
    snapshot.resolved_sections.push(dashboard_gate_core::ResolvedSection {
        section_id: SectionId::new("section-a"),
        label: "Section A".to_string(),
        icon: None,
        children: None,
    });

    assert!(!verify_dashboard_snapshot(&snapshot));

    let mut snapshot = snapshot_with(&[], None);
    snapshot.hidden_sections.clear();
    assert!(!verify_dashboard_snapshot(&snapshot));

    let mut snapshot = snapshot_with(&[], None);
    snapshot.reasons[0].details = "edited".to_string();
    assert!(!verify_dashboard_snapshot(&snapshot));
}

#[test]
fn tampered_checksum_fails_verification() {
    let mut snapshot = snapshot_with(&["premium"], None);
    snapshot.checksum = Checksum::new("0".repeat(64));

    assert!(!verify_dashboard_snapshot(&snapshot));
}

#[test]
fn different_evaluation_time_fails_integrity() {
    let snapshot = snapshot_with(&["premium"], None);
    let later = Timestamp::parse("2025-01-19T14:00:00.001Z").unwrap();

    assert!(!verify_snapshot_integrity(&snapshot, later));
}

#[test]
fn unbound_fields_do_not_affect_checksum() {
    let mut snapshot = snapshot_with(&["premium"], Some(3_600_000));
    snapshot.snapshot_id = SnapshotId::new("other");
    snapshot.expires_at = None;

    assert!(verify_dashboard_snapshot(&snapshot));
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

#[test]
fn unexpired_snapshot_replays_stored_result() {
    let snapshot = snapshot_with(&[], Some(3_600_000));
    let at = Timestamp::parse("2025-01-19T15:00:00.000Z").unwrap();

    let replayed = evaluate_from_snapshot(&snapshot, at);

    assert_eq!(replayed, resolved_with(&[]));
}

#[test]
fn expired_snapshot_returns_empty_result() {
    let snapshot = snapshot_with(&[], Some(3_600_000));
    let at = Timestamp::parse("2025-01-19T15:00:00.001Z").unwrap();

    let replayed = evaluate_from_snapshot(&snapshot, at);

    assert!(replayed.visible_sections.is_empty());
    assert_eq!(replayed.hidden_sections, vec![SectionId::new("section-a")]);
    assert_eq!(replayed.reasons.len(), 1);
    assert_eq!(replayed.reasons[0].section_id, SectionId::new("snapshot-test"));
    assert_eq!(replayed.reasons[0].reason, HiddenReasonCode::MissingFeature);
    assert_eq!(replayed.reasons[0].details, "Snapshot expired at 2025-01-19T15:00:00.000Z");
}

#[test]
fn snapshot_without_expiry_never_expires() {
    let snapshot = snapshot_with(&["premium"], None);
    let far = Timestamp::parse("2999-12-31T23:59:59.999Z").unwrap();

    assert_eq!(evaluate_from_snapshot(&snapshot, far).visible_sections.len(), 2);
}

#[test]
fn clock_driven_evaluation_uses_clock_instant() {
    let snapshot = snapshot_with(&["premium"], Some(1_000));
    let clock = FixedClock::new(Timestamp::parse("2025-01-20T00:00:00Z").unwrap());

    let replayed = evaluate_from_snapshot_now(&snapshot, &clock).unwrap();

    assert!(replayed.visible_sections.is_empty());
}

#[test]
fn snapshot_round_trips_through_json() {
    let snapshot = snapshot_with(&[], Some(3_600_000));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["resolvedSections"][0]["sectionId"], "section-b");
    assert_eq!(json["expiresAt"], "2025-01-19T15:00:00.000Z");
    assert_eq!(json["reasons"][0]["reason"], "missing_entitlement");

    let decoded: DashboardSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, snapshot);
    assert!(verify_dashboard_snapshot(&decoded));
}
