// crates/dashboard-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Dashboard Gate Runtime
// Description: Resolution engine, snapshot builder/verifier, and facade.
// Purpose: Decide section visibility and reproduce decisions offline.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement access checks, the section and dashboard
//! resolvers, snapshot generation/verification/replay, and the audited
//! [`DashboardGate`] facade. Every entry point is synchronous and holds no
//! process-wide state; identical inputs always produce identical outputs.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod access;
pub mod gate;
pub mod resolver;
pub mod sections;
pub mod snapshot;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use access::AccessAxis;
pub use access::AccessCheck;
pub use access::check_capabilities;
pub use access::check_entitlements;
pub use access::check_features;
pub use gate::DashboardGate;
pub use gate::SnapshotPolicy;
pub use resolver::IsolationError;
pub use resolver::IsolationFaultKind;
pub use resolver::resolve_dashboard;
pub use sections::GrantView;
pub use sections::ResolutionTrace;
pub use sections::resolve_sections;
pub use snapshot::SnapshotError;
pub use snapshot::evaluate_from_snapshot;
pub use snapshot::evaluate_from_snapshot_now;
pub use snapshot::generate_dashboard_snapshot;
pub use snapshot::generate_dashboard_snapshot_with_id;
pub use snapshot::verify_dashboard_snapshot;
pub use snapshot::verify_snapshot_integrity;
