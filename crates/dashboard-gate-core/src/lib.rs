// crates/dashboard-gate-core/src/lib.rs
// ============================================================================
// Module: Dashboard Gate Core Library
// Description: Public API surface for the Dashboard Gate core.
// Purpose: Expose core types, interfaces, audit sinks, and runtime helpers.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Dashboard Gate resolves which sections of a declarative dashboard a
//! principal may see. Isolation boundaries (subject type, tenant, partner)
//! abort resolution; capability, entitlement, and feature denials are
//! returned as explainable data. Resolution results can be frozen into
//! checksummed snapshots and replayed offline.
//!
//! Security posture: snapshot checksums detect corruption, not forgery; see
//! [`runtime::snapshot`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ResolutionAuditEvent;
pub use audit::ResolutionOutcome;
pub use audit::SnapshotAuditEvent;
pub use audit::SnapshotOutcome;
pub use audit::StderrAuditSink;
pub use crate::core::*;
pub use interfaces::Clock;
pub use interfaces::FixedClock;
pub use interfaces::SystemClock;
pub use runtime::DashboardGate;
pub use runtime::IsolationError;
pub use runtime::IsolationFaultKind;
pub use runtime::SnapshotError;
pub use runtime::SnapshotPolicy;
pub use runtime::evaluate_from_snapshot;
pub use runtime::evaluate_from_snapshot_now;
pub use runtime::generate_dashboard_snapshot;
pub use runtime::generate_dashboard_snapshot_with_id;
pub use runtime::resolve_dashboard;
pub use runtime::verify_dashboard_snapshot;
pub use runtime::verify_snapshot_integrity;
